//! Mutable state for one part's extraction run.

use crate::error::{PinoutError, PinoutResult};
use crate::store::ResultStore;

/// Everything a batch run reads and writes outside the stages themselves.
///
/// One session covers one part number at a time. Setting a different part
/// number drops the cached web context, since that text was fetched for
/// the previous part. Results and the uploaded document survive until
/// they are explicitly cleared or replaced.
#[derive(Debug)]
pub struct ExtractionSession {
    id: String,
    started_at: chrono::DateTime<chrono::Utc>,
    part_number: Option<String>,
    web_context: Option<String>,
    file_bytes: Option<Vec<u8>>,
    results: ResultStore,
    extraction_attempts: u32,
}

impl Default for ExtractionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionSession {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: chrono::Utc::now(),
            part_number: None,
            web_context: None,
            file_bytes: None,
            results: ResultStore::default(),
            extraction_attempts: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }

    pub fn part_number(&self) -> Option<&str> {
        self.part_number.as_deref()
    }

    /// Set the part under extraction, invalidating the web cache on change.
    pub fn set_part_number(&mut self, part_number: Option<String>) {
        if self.part_number != part_number {
            self.web_context = None;
        }
        self.part_number = part_number;
    }

    pub fn web_context(&self) -> Option<&str> {
        self.web_context.as_deref()
    }

    /// Cache cleaned web page text for the current part.
    pub fn set_web_context(&mut self, text: Option<String>) {
        self.web_context = text;
    }

    pub fn file_bytes(&self) -> Option<&[u8]> {
        self.file_bytes.as_deref()
    }

    pub fn set_file_bytes(&mut self, bytes: Option<Vec<u8>>) {
        self.file_bytes = bytes;
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultStore {
        &mut self.results
    }

    /// Count one batch entry against the runaway limit.
    ///
    /// Returns the attempt number, or an error once the run exceeds
    /// `max_attempts`. On the failing attempt the accumulated results
    /// are cleared and the counter resets, so the next batch starts
    /// from a clean slate.
    pub fn register_attempt(&mut self, max_attempts: u32) -> PinoutResult<u32> {
        self.extraction_attempts += 1;
        if self.extraction_attempts > max_attempts {
            self.results.clear();
            self.extraction_attempts = 0;
            return Err(PinoutError::validation(format!(
                "extraction attempt limit reached ({max_attempts}), aborting and clearing results"
            )));
        }
        Ok(self.extraction_attempts)
    }

    /// Mark the batch finished, re-arming the attempt guard.
    pub fn complete_batch(&mut self) {
        self.extraction_attempts = 0;
    }

    pub fn extraction_attempts(&self) -> u32 {
        self.extraction_attempts
    }

    /// Forget everything, as when the operator starts over.
    ///
    /// The reset session gets a fresh id and start time.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_change_invalidates_web_context() {
        let mut session = ExtractionSession::new();
        session.set_part_number(Some("1-1234567-1".to_string()));
        session.set_web_context(Some("cleaned page text".to_string()));

        session.set_part_number(Some("1-1234567-1".to_string()));
        assert_eq!(session.web_context(), Some("cleaned page text"));

        session.set_part_number(Some("2-9876543-0".to_string()));
        assert_eq!(session.web_context(), None);
    }

    #[test]
    fn test_attempt_guard_aborts_and_clears() {
        let mut session = ExtractionSession::new();
        session
            .results_mut()
            .replace(crate::types::AttributeRecord::pending("Gender"));

        assert_eq!(session.register_attempt(3).unwrap(), 1);
        assert_eq!(session.register_attempt(3).unwrap(), 2);
        assert_eq!(session.register_attempt(3).unwrap(), 3);

        let err = session.register_attempt(3).unwrap_err();
        assert!(err.to_string().contains("attempt limit"));
        assert!(session.results().is_empty());
        assert_eq!(session.extraction_attempts(), 0);
    }

    #[test]
    fn test_completion_rearms_the_guard() {
        let mut session = ExtractionSession::new();
        for _ in 0..3 {
            session.register_attempt(3).unwrap();
        }
        session.complete_batch();
        assert_eq!(session.register_attempt(3).unwrap(), 1);
    }

    #[test]
    fn test_reset_starts_a_fresh_session() {
        let mut session = ExtractionSession::new();
        let original_id = session.id().to_string();
        session.set_part_number(Some("1-1234567-1".to_string()));

        session.reset();
        assert!(session.part_number().is_none());
        assert_ne!(session.id(), original_id);
    }
}
