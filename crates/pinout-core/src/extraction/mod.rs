//! Single-attribute LLM extraction: prompt assembly, response parsing,
//! and outcome classification.

mod classify;
mod invoker;
mod json_parser;
mod prompts;

pub use classify::classify_raw;
pub use invoker::{ExtractionContext, ExtractionInvoker, InvocationResult};
pub use json_parser::{extract_json_object, lookup_attribute, strip_think_tags};
pub use prompts::{augment_for_recheck, render_document_prompt, render_web_prompt};
