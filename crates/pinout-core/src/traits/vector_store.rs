//! Vector store trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PinoutResult;
use crate::types::Filter;

/// Distance metric for vector similarity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
}

/// A vector record with payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier.
    pub id: String,
    /// Vector embedding.
    pub vector: Vec<f32>,
    /// Metadata payload.
    pub payload: HashMap<String, serde_json::Value>,
    /// Similarity score (from search).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl VectorRecord {
    /// Create a new vector record.
    pub fn new(
        id: impl Into<String>,
        vector: Vec<f32>,
        payload: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            vector,
            payload,
            score: None,
        }
    }

    /// Get a payload value as a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }

    /// Get the "data" field (chunk text content).
    pub fn get_data(&self) -> Option<&str> {
        self.get_string("data")
    }
}

/// Search result from vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResult {
    /// Unique identifier.
    pub id: String,
    /// Similarity score.
    pub score: f32,
    /// Metadata payload.
    pub payload: HashMap<String, serde_json::Value>,
}

/// Core VectorStore trait - all vector store backends implement this.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert vectors into the collection.
    async fn insert(&self, records: Vec<VectorRecord>) -> PinoutResult<()>;

    /// Search for similar vectors.
    async fn search(
        &self,
        query_vector: &[f32],
        limit: usize,
        filters: Option<Filter>,
    ) -> PinoutResult<Vec<VectorSearchResult>>;

    /// Get a vector by ID.
    async fn get(&self, id: &str) -> PinoutResult<Option<VectorRecord>>;

    /// Delete a vector by ID.
    async fn delete(&self, id: &str) -> PinoutResult<()>;

    /// List vectors with optional filters.
    async fn list(
        &self,
        filters: Option<Filter>,
        limit: Option<usize>,
    ) -> PinoutResult<Vec<VectorRecord>>;

    /// Reset (clear) the collection.
    async fn reset(&self) -> PinoutResult<()>;

    /// Get the collection name.
    fn collection_name(&self) -> &str;
}

/// Vector store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Provider type.
    pub provider: VectorStoreProvider,
    /// Collection name.
    pub collection_name: String,
    /// Embedding dimensions.
    #[serde(default = "default_embedding_dims")]
    pub embedding_model_dims: usize,
}

fn default_embedding_dims() -> usize {
    1024
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            provider: VectorStoreProvider::InMemory,
            collection_name: "pdf_qa_prod_collection".to_string(),
            embedding_model_dims: default_embedding_dims(),
        }
    }
}

/// Vector store provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreProvider {
    #[default]
    InMemory,
    Chroma,
    Qdrant,
}
