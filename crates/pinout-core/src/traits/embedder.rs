//! Embedder trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PinoutResult;

/// The action context for embedding (some models use different embeddings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingAction {
    /// Adding to the store.
    #[default]
    Add,
    /// Searching the store.
    Search,
}

/// Core Embedder trait - all embedding providers implement this.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for a single text.
    async fn embed(&self, text: &str, action: Option<EmbeddingAction>) -> PinoutResult<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch).
    async fn embed_batch(
        &self,
        texts: &[String],
        action: Option<EmbeddingAction>,
    ) -> PinoutResult<Vec<Vec<f32>>> {
        // Default implementation: sequential embedding
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text, action).await?);
        }
        Ok(embeddings)
    }

    /// Get the dimension of the embeddings.
    fn dimension(&self) -> usize;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// Embedder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderConfig {
    /// Model name/identifier.
    pub model: String,
    /// Embedding dimensions.
    #[serde(default = "default_embedding_dims")]
    pub embedding_dims: usize,
    /// How many texts to send per remote batch request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Texts longer than this are truncated before embedding.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// API key (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_embedding_dims() -> usize {
    1024
}

fn default_batch_size() -> usize {
    5
}

fn default_max_text_length() -> usize {
    30000
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model: "BAAI/bge-m3".to_string(),
            embedding_dims: default_embedding_dims(),
            batch_size: default_batch_size(),
            max_text_length: default_max_text_length(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Embedder provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderProvider {
    #[default]
    HuggingFace,
    OpenAI,
}
