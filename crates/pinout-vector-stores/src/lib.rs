//! pinout-vector-stores - Vector store implementations for pinout.
//!
//! This crate provides the vector index behind datasheet chunk
//! retrieval.
//!
//! # Supported Backends
//!
//! - **InMemory** - process-local store scored with cosine similarity
//!
//! Chroma and Qdrant are reserved in the provider enum for deployments
//! that need a persistent index; requesting them currently returns an
//! unsupported-provider error.
//!
//! # Example
//!
//! ```ignore
//! use pinout_vector_stores::VectorStoreFactory;
//!
//! let store = VectorStoreFactory::in_memory()?;
//! ```

mod factory;
mod memory;

// Public exports
pub use factory::VectorStoreFactory;
pub use memory::InMemoryVectorStore;

// Re-export core types for convenience
pub use pinout_core::traits::{
    DistanceMetric, VectorRecord, VectorSearchResult, VectorStore, VectorStoreConfig,
    VectorStoreProvider,
};
pub use pinout_core::types::Filter;
