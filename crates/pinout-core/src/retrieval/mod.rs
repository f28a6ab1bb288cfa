//! Tag-aware chunk retrieval for the document extraction stages.

mod retriever;

pub use retriever::ChunkRetriever;
