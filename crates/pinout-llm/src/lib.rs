//! pinout-llm - LLM provider implementations for pinout.
//!
//! This crate provides the LLM backends used by the staged extraction
//! pipeline.
//!
//! # Supported Providers
//!
//! - **Groq** - OpenAI-compatible chat completions, used by every stage
//!
//! # Example
//!
//! ```ignore
//! use pinout_llm::LlmFactory;
//!
//! // Create a Groq LLM with the default model
//! let llm = LlmFactory::groq()?;
//!
//! // Or with a specific model
//! let llm = LlmFactory::groq_with_model("qwen/qwen3-32b")?;
//! ```

mod factory;
mod groq;

pub use factory::LlmFactory;
pub use groq::GroqLlm;

// Re-export core types for convenience
pub use pinout_core::config::LlmProvider;
pub use pinout_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat};
