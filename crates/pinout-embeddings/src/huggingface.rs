//! Hugging Face Space embedding provider implementation.
//!
//! Talks to a self-hosted embedding endpoint that accepts
//! `{"texts": [...]}` and answers with a vector matrix under one of
//! several keys, depending on how the Space is deployed. Requests are
//! batched and retried on transient failures.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ConstantBuilder, Retryable};
use reqwest::Client;
use serde_json::Value;

use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{Embedder, EmbedderConfig, EmbeddingAction};

/// Retries after the initial attempt, one second apart.
const MAX_RETRIES: usize = 2;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Hugging Face Space embedding provider.
pub struct HuggingFaceEmbedder {
    client: Client,
    config: EmbedderConfig,
    api_url: String,
}

impl HuggingFaceEmbedder {
    /// Create a new Hugging Face embedder.
    ///
    /// The endpoint URL must come from the configuration or the
    /// `EMBEDDING_API_URL` environment variable; there is no default.
    pub fn new(config: EmbedderConfig) -> PinoutResult<Self> {
        let api_url = config
            .base_url
            .clone()
            .or_else(|| std::env::var("EMBEDDING_API_URL").ok())
            .ok_or_else(|| {
                PinoutError::Configuration("Embedding API URL not found. Set EMBEDDING_API_URL environment variable or provide base_url in config.".to_string())
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json"
                .parse()
                .map_err(|_| PinoutError::Configuration("Invalid content type".to_string()))?,
        );
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("HF_API_KEY").ok());
        if let Some(api_key) = api_key {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", api_key).parse().map_err(|_| {
                    PinoutError::Configuration("Invalid API key format".to_string())
                })?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                PinoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            api_url,
        })
    }

    /// Truncate a text to the configured maximum length.
    fn prepare_text(&self, text: &str) -> String {
        let max = self.config.max_text_length;
        if text.chars().count() > max {
            tracing::warn!(
                length = text.len(),
                max_length = max,
                "truncating text before embedding"
            );
            text.chars().take(max).collect()
        } else {
            text.to_string()
        }
    }

    /// One embedding request for up to `batch_size` texts, retried on
    /// transient failures.
    async fn request_embeddings(&self, texts: &[String]) -> PinoutResult<Vec<Vec<f32>>> {
        let attempt = || async {
            let response = self
                .client
                .post(&self.api_url)
                .json(&serde_json::json!({ "texts": texts }))
                .send()
                .await
                .map_err(|e| PinoutError::api(format!("Embedding API request failed: {}", e)))?;

            let status = response.status();
            let body = response.text().await.map_err(|e| {
                PinoutError::api(format!("Failed to read embedding response body: {}", e))
            })?;

            if status.is_server_error() {
                return Err(PinoutError::api(format!(
                    "Embedding API error ({}): {}",
                    status, body
                )));
            }
            if !status.is_success() {
                return Err(PinoutError::from_http_status(status.as_u16(), &body));
            }

            let value: Value = serde_json::from_str(&body).map_err(|e| {
                PinoutError::embedding(format!("Failed to parse embedding response: {}", e))
            })?;
            parse_embeddings(value)
        };

        let embeddings = attempt
            .retry(
                ConstantBuilder::default()
                    .with_delay(RETRY_DELAY)
                    .with_max_times(MAX_RETRIES),
            )
            .when(|e: &PinoutError| {
                matches!(
                    e,
                    PinoutError::Network { .. } | PinoutError::RateLimit { .. }
                )
            })
            .notify(|err, dur| {
                tracing::warn!(error = %err, "embedding batch failed, retrying in {:?}", dur);
            })
            .await?;

        if embeddings.len() != texts.len() {
            return Err(PinoutError::embedding(format!(
                "Embedding API returned {} vectors for {} texts",
                embeddings.len(),
                texts.len()
            )));
        }
        Ok(embeddings)
    }
}

/// Pull the vector matrix out of a Space response.
///
/// Deployments differ: some answer `{"embeddings": [...]}`, some
/// `{"vectors": [...]}`, some a bare matrix, and some wrap it under
/// `data` or `result`. Every shape is tried before giving up.
fn parse_embeddings(value: Value) -> PinoutResult<Vec<Vec<f32>>> {
    let candidate = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => ["embeddings", "vectors", "data", "result"]
            .iter()
            .find_map(|key| map.remove(*key))
            .ok_or_else(|| {
                PinoutError::embedding(format!(
                    "Unexpected embedding response format: keys {:?}",
                    map.keys().collect::<Vec<_>>()
                ))
            })?,
        other => {
            return Err(PinoutError::embedding(format!(
                "Unexpected embedding response format: {}",
                other
            )))
        }
    };

    serde_json::from_value(candidate)
        .map_err(|e| PinoutError::embedding(format!("Embedding response was not a matrix: {}", e)))
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed(&self, text: &str, _action: Option<EmbeddingAction>) -> PinoutResult<Vec<f32>> {
        let texts = vec![self.prepare_text(text)];
        let mut embeddings = self.request_embeddings(&texts).await?;
        embeddings
            .pop()
            .ok_or_else(|| PinoutError::embedding("Embedding API returned no vectors"))
    }

    async fn embed_batch(
        &self,
        texts: &[String],
        _action: Option<EmbeddingAction>,
    ) -> PinoutResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let processed: Vec<String> = texts.iter().map(|text| self.prepare_text(text)).collect();

        let batch_size = self.config.batch_size.max(1);
        let total_batches = processed.len().div_ceil(batch_size);
        let mut all_embeddings = Vec::with_capacity(processed.len());
        for (index, batch) in processed.chunks(batch_size).enumerate() {
            tracing::debug!(
                batch = index + 1,
                total_batches,
                texts = batch.len(),
                "embedding batch"
            );
            all_embeddings.extend(self.request_embeddings(batch).await?);
        }

        tracing::info!(count = all_embeddings.len(), "embedded documents");
        Ok(all_embeddings)
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dims
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
