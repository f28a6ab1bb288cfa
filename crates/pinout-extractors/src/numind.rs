//! NuMind structured extraction provider.
//!
//! NuMind runs template-based extraction server-side: the project holds
//! the attribute template, and one upload of the raw file bytes returns
//! a flat attribute-to-value mapping covering every template field.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{DocumentExtractor, ExtractorConfig};

const NUMIND_API_URL: &str = "https://api.numind.ai/api";

/// NuMind document extraction provider.
pub struct NuMindExtractor {
    client: Client,
    config: ExtractorConfig,
    base_url: String,
}

impl NuMindExtractor {
    /// Create a new NuMind extractor.
    pub fn new(config: ExtractorConfig) -> PinoutResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("NUMIND_API_KEY").ok())
            .ok_or_else(|| {
                PinoutError::Configuration("NuMind API key not found. Set NUMIND_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        let mut config = config;
        if config.project_id.is_empty() {
            config.project_id = std::env::var("NUMIND_PROJECT_ID").map_err(|_| {
                PinoutError::Configuration("NuMind project id not found. Set NUMIND_PROJECT_ID environment variable or provide project_id in config.".to_string())
            })?;
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", api_key)
                .parse()
                .map_err(|_| PinoutError::Configuration("Invalid API key format".to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                PinoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| NUMIND_API_URL.to_string());

        Ok(Self {
            client,
            config,
            base_url,
        })
    }
}

#[async_trait]
impl DocumentExtractor for NuMindExtractor {
    async fn extract(
        &self,
        file_bytes: &[u8],
    ) -> PinoutResult<serde_json::Map<String, serde_json::Value>> {
        if file_bytes.is_empty() {
            return Err(PinoutError::extractor("no file bytes to extract from"));
        }

        tracing::info!(
            bytes = file_bytes.len(),
            project = self.config.project_id.as_str(),
            "starting structured document extraction"
        );

        let part = Part::bytes(file_bytes.to_vec())
            .file_name("document.pdf")
            .mime_str("application/pdf")
            .map_err(|e| PinoutError::extractor(format!("Failed to build upload part: {}", e)))?;
        let form = Form::new().part("input_file", part);

        let response = self
            .client
            .post(format!(
                "{}/projects/{}/extract",
                self.base_url, self.config.project_id
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinoutError::extractor(format!("NuMind API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PinoutError::extractor(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(PinoutError::from_http_status(status.as_u16(), &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| PinoutError::extractor(format!("Failed to parse response: {}", e)))?;
        let mapping = parse_extraction(value)?;

        tracing::debug!(keys = mapping.len(), "structured extraction response parsed");
        Ok(mapping)
    }

    fn provider_name(&self) -> &str {
        "numind"
    }
}

/// The attribute mapping is the response object itself; callers resolve
/// individual attributes with exact-key then one-level-nested lookup, so
/// a wrapper object around the flat map still resolves.
fn parse_extraction(
    value: serde_json::Value,
) -> PinoutResult<serde_json::Map<String, serde_json::Value>> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(PinoutError::extractor(format!(
            "Expected a JSON object from extraction, got: {}",
            other
        ))),
    }
}
