//! pinout-extractors - Structured document extraction providers for pinout.
//!
//! This crate provides template-based extraction backends that turn an
//! uploaded datasheet into a flat attribute map in one call, feeding the
//! structured branch of the document stage.
//!
//! # Supported Providers
//!
//! - **NuMind** - project-template extraction over uploaded file bytes
//!
//! # Example
//!
//! ```ignore
//! use pinout_extractors::ExtractorFactory;
//!
//! // Reads NUMIND_API_KEY and NUMIND_PROJECT_ID; None disables the stage.
//! let extractor = ExtractorFactory::from_env();
//! ```

mod factory;
mod numind;

// Public exports
pub use factory::ExtractorFactory;
pub use numind::NuMindExtractor;

// Re-export core types for convenience
pub use pinout_core::traits::{DocumentExtractor, ExtractorConfig, ExtractorProvider};
