//! pinout-core - Core library for pinout.
//!
//! This crate provides the types, traits, and staged pipeline for
//! extracting structured connector attributes from web text, retrieved
//! PDF context, and structured document-extraction backends.
//!
//! # Example
//!
//! ```ignore
//! use pinout_core::{
//!     AttributeCatalog, ChunkRetriever, ExtractionConfig, ExtractionInvoker,
//!     ExtractionSession, StageOrchestrator,
//! };
//!
//! let config = ExtractionConfig::from_env()?;
//! let retriever = ChunkRetriever::new(embedder, vector_store, config.retrieval.clone());
//! let orchestrator = StageOrchestrator::new(
//!     AttributeCatalog::builtin().clone(),
//!     ExtractionInvoker::new(llm),
//!     retriever,
//! )
//! .with_web_source(web_source)
//! .with_pacing(config.pacing.clone());
//!
//! let mut session = ExtractionSession::new();
//! session.set_part_number(Some("2-1234567-1".to_string()));
//! session.set_file_bytes(Some(file_bytes));
//! orchestrator.run_batch(&mut session).await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod ingest;
pub mod pipeline;
pub mod retrieval;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::AttributeCatalog;
pub use config::{ExtractionConfig, PacingConfig, RetrievalConfig};
pub use error::{PinoutError, PinoutResult};
pub use export::{export_csv, export_jsonl, ExportStats};
pub use extraction::{ExtractionContext, ExtractionInvoker, InvocationResult};
pub use ingest::DocumentIngestor;
pub use pipeline::StageOrchestrator;
pub use retrieval::ChunkRetriever;
pub use session::ExtractionSession;
pub use store::ResultStore;
pub use traits::{
    DocumentExtractor, Embedder, EmbedderConfig, EmbeddingAction, ExtractorConfig,
    ExtractorProvider, Llm, LlmConfig, VectorStore, VectorStoreConfig, WebSource,
};
pub use types::{
    AttributeRecord, AttributeSpec, DocumentChunk, ExtractionSource, ExtractionStage, Filter,
    Message, Outcome,
};
