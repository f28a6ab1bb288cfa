//! Structured document extraction trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PinoutResult;

/// A template-based structured extraction backend.
///
/// One call consumes the raw uploaded file bytes and returns a flat
/// attribute-name to value mapping for many attributes at once. Values may
/// be JSON null for attributes the backend could not find. Whether the
/// backend is configured at all is decided once per session; an absent
/// credential means the provider is never constructed.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract an attribute mapping from raw file bytes.
    async fn extract(
        &self,
        file_bytes: &[u8],
    ) -> PinoutResult<serde_json::Map<String, serde_json::Value>>;

    /// Get the provider name.
    fn provider_name(&self) -> &str;
}

/// Document extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Extraction project (template) identifier on the provider side.
    pub project_id: String,
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

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Document extractor provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorProvider {
    #[default]
    NuMind,
}
