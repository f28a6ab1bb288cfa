//! Factory for creating LLM providers.

use std::sync::Arc;

use pinout_core::config::LlmProvider;
use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{Llm, LlmConfig};

use crate::groq::GroqLlm;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> PinoutResult<Arc<dyn Llm>> {
        match provider {
            LlmProvider::Groq => {
                let llm = GroqLlm::new(config)?;
                Ok(Arc::new(llm))
            }
            other => Err(PinoutError::UnsupportedProvider {
                provider: format!("{:?}", other),
            }),
        }
    }

    /// Create a Groq LLM provider with default configuration.
    pub fn groq() -> PinoutResult<Arc<dyn Llm>> {
        Self::create(LlmProvider::Groq, LlmConfig::default())
    }

    /// Create a Groq LLM provider with a specific model.
    pub fn groq_with_model(model: impl Into<String>) -> PinoutResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::Groq, config)
    }
}
