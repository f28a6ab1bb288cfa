//! Web text source trait.

use async_trait::async_trait;

use crate::error::PinoutResult;

/// A collaborator that produces cleaned website text for a part number.
///
/// The scraping and cleaning pipeline itself is out of scope here; the
/// orchestrator only cares about a single text blob or nothing. Returning
/// `Ok(None)` means no usable web data exists for the part, which skips
/// the web stage entirely.
#[async_trait]
pub trait WebSource: Send + Sync {
    /// Fetch cleaned web text for a part number.
    async fn fetch(&self, part_number: &str) -> PinoutResult<Option<String>>;
}
