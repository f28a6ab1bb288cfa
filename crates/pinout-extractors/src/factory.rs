//! Factory for creating document extraction providers.

use std::sync::Arc;

use pinout_core::error::PinoutResult;
use pinout_core::traits::{DocumentExtractor, ExtractorConfig, ExtractorProvider};

use crate::numind::NuMindExtractor;

/// Factory for creating document extraction providers.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a document extractor from the given configuration.
    pub fn create(
        provider: ExtractorProvider,
        config: ExtractorConfig,
    ) -> PinoutResult<Arc<dyn DocumentExtractor>> {
        match provider {
            ExtractorProvider::NuMind => Ok(Arc::new(NuMindExtractor::new(config)?)),
        }
    }

    /// Create a NuMind extractor for the given project.
    pub fn numind(project_id: &str) -> PinoutResult<Arc<dyn DocumentExtractor>> {
        let config = ExtractorConfig {
            project_id: project_id.to_string(),
            ..ExtractorConfig::default()
        };
        Self::create(ExtractorProvider::NuMind, config)
    }

    /// Build the extractor from environment configuration, if present.
    ///
    /// Structured extraction is optional. A missing NUMIND_API_KEY or
    /// NUMIND_PROJECT_ID disables the provider for the whole run instead
    /// of failing the pipeline; the document stage then falls back to
    /// retrieved PDF context.
    pub fn from_env() -> Option<Arc<dyn DocumentExtractor>> {
        if std::env::var("NUMIND_API_KEY").is_err() {
            tracing::warn!("NUMIND_API_KEY not set, structured document extraction disabled");
            return None;
        }

        match Self::create(ExtractorProvider::NuMind, ExtractorConfig::default()) {
            Ok(extractor) => {
                tracing::info!("structured document extraction enabled");
                Some(extractor)
            }
            Err(e) => {
                tracing::warn!(error = %e, "structured document extraction disabled");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_with_explicit_credentials() {
        let config = ExtractorConfig {
            project_id: "proj_123".to_string(),
            api_key: Some("test-key".to_string()),
            ..ExtractorConfig::default()
        };

        let extractor = ExtractorFactory::create(ExtractorProvider::NuMind, config).unwrap();
        assert_eq!(extractor.provider_name(), "numind");
    }
}
