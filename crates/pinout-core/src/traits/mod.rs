//! Core traits for pinout providers.

mod document_extractor;
mod embedder;
mod llm;
mod vector_store;
mod web_source;

pub use document_extractor::*;
pub use embedder::*;
pub use llm::*;
pub use vector_store::*;
pub use web_source::*;
