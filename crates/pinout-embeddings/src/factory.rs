//! Factory for creating embedding providers.

use std::sync::Arc;

use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{Embedder, EmbedderConfig, EmbedderProvider};

use crate::huggingface::HuggingFaceEmbedder;

/// Factory for creating embedding providers.
pub struct EmbedderFactory;

impl EmbedderFactory {
    /// Create an embedder from the given configuration.
    pub fn create(
        provider: EmbedderProvider,
        config: EmbedderConfig,
    ) -> PinoutResult<Arc<dyn Embedder>> {
        match provider {
            EmbedderProvider::HuggingFace => {
                let embedder = HuggingFaceEmbedder::new(config)?;
                Ok(Arc::new(embedder))
            }
            other => Err(PinoutError::UnsupportedProvider {
                provider: format!("{:?}", other),
            }),
        }
    }

    /// Create a Hugging Face embedder with default configuration.
    pub fn huggingface() -> PinoutResult<Arc<dyn Embedder>> {
        Self::create(EmbedderProvider::HuggingFace, EmbedderConfig::default())
    }

    /// Create a Hugging Face embedder against a specific endpoint.
    pub fn huggingface_with_url(url: impl Into<String>) -> PinoutResult<Arc<dyn Embedder>> {
        let config = EmbedderConfig {
            base_url: Some(url.into()),
            ..Default::default()
        };
        Self::create(EmbedderProvider::HuggingFace, config)
    }
}
