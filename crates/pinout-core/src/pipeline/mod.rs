//! Staged extraction pipeline and its rollback rules.

mod orchestrator;
mod recheck;

pub use orchestrator::StageOrchestrator;
pub use recheck::{apply_recheck, should_rollback};
