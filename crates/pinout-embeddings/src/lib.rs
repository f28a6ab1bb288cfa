//! pinout-embeddings - Embedding provider implementations for pinout.
//!
//! This crate provides the embedding backends used to index and retrieve
//! document chunks.
//!
//! # Supported Providers
//!
//! - **Hugging Face** - a self-hosted Space endpoint serving BAAI/bge-m3
//!   or any model with the same request shape
//!
//! # Example
//!
//! ```ignore
//! use pinout_embeddings::EmbedderFactory;
//!
//! // Endpoint from the EMBEDDING_API_URL environment variable
//! let embedder = EmbedderFactory::huggingface()?;
//!
//! // Or against an explicit endpoint
//! let embedder = EmbedderFactory::huggingface_with_url("https://example.hf.space/embed")?;
//! ```

mod factory;
mod huggingface;

pub use factory::EmbedderFactory;
pub use huggingface::HuggingFaceEmbedder;

// Re-export core types for convenience
pub use pinout_core::traits::{Embedder, EmbedderConfig, EmbedderProvider, EmbeddingAction};
