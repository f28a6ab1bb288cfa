//! The per-attribute result record and its status flags.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::outcome::{is_empty_like, ExtractionStage, Outcome};

/// Placeholder value recorded when the web stage could not run.
pub const WEB_STAGE_SKIPPED: &str = "(Web Stage Skipped)";

/// Provenance of the current value of an attribute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ExtractionSource {
    /// No stage has produced a value yet.
    #[strum(to_string = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    /// Stage 1, cleaned website data.
    #[strum(to_string = "Web")]
    #[serde(rename = "Web")]
    Web,
    /// Stage 2, structured document-extraction API.
    #[strum(to_string = "NuMind")]
    #[serde(rename = "NuMind")]
    NuMindApi,
    /// Stage 2 fallback, retrieved PDF context.
    #[strum(to_string = "PDF")]
    #[serde(rename = "PDF")]
    Pdf,
    /// Stage 3 final recheck.
    #[strum(to_string = "Final Fallback")]
    #[serde(rename = "Final Fallback")]
    FinalFallback,
    /// User-initiated recheck.
    #[strum(to_string = "Manual Recheck")]
    #[serde(rename = "Manual Recheck")]
    ManualRecheck,
}

/// The authoritative mutable record for one attribute within a session.
///
/// Each stage replaces the record wholesale (read current, compute new,
/// write new) so the rollback comparison always sees a consistent
/// value/source/flags triple, never a half-patched one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Attribute key this record belongs to.
    pub prompt_name: String,
    /// Current best value, possibly a sentinel string.
    pub extracted_value: String,
    /// Stage that produced the current value.
    pub source: ExtractionSource,
    /// Verbatim model output from the latest stage that wrote this record.
    pub raw_output: String,
    /// Parse diagnostic from the latest stage, if any.
    pub parse_error: Option<String>,
    pub is_success: bool,
    pub is_error: bool,
    pub is_not_found: bool,
    pub is_rate_limited: bool,
    /// Cumulative latency across every stage that touched this attribute.
    pub latency_seconds: f64,
}

impl AttributeRecord {
    /// Placeholder record created before any stage has run.
    pub fn pending(prompt_name: impl Into<String>) -> Self {
        Self {
            prompt_name: prompt_name.into(),
            extracted_value: WEB_STAGE_SKIPPED.to_string(),
            source: ExtractionSource::Pending,
            raw_output: "N/A".to_string(),
            parse_error: None,
            is_success: false,
            is_error: false,
            is_not_found: true,
            is_rate_limited: false,
            latency_seconds: 0.0,
        }
    }

    /// Build a record from a classified outcome.
    ///
    /// `latency_seconds` is the cumulative total the caller has computed,
    /// not just the latest stage's duration.
    pub fn from_outcome(
        prompt_name: impl Into<String>,
        stage: ExtractionStage,
        outcome: &Outcome,
        raw_output: impl Into<String>,
        latency_seconds: f64,
    ) -> Self {
        let extracted_value = outcome.render_value(stage);
        let parse_error = outcome.parse_error(stage);
        let is_rate_limited = outcome.is_rate_limited();
        let is_error = parse_error.is_some() && !is_rate_limited;
        let is_not_found = outcome.is_not_found();
        let is_success = !is_error && !is_not_found && !is_rate_limited;

        Self {
            prompt_name: prompt_name.into(),
            extracted_value,
            source: stage.source(),
            raw_output: raw_output.into(),
            parse_error,
            is_success,
            is_error,
            is_not_found,
            is_rate_limited,
            latency_seconds,
        }
    }

    /// Whether this record queues for the structured document fallback.
    pub fn needs_document_fallback(&self) -> bool {
        !self.is_success
    }

    /// Whether this record is in the final recheck set.
    ///
    /// Rate-limited records are deliberately not rechecked here; they are
    /// surfaced to the user as throttling rather than retried blindly.
    /// Empty-like values recheck even though they were "successful",
    /// because such answers are historically often false negatives.
    pub fn needs_final_recheck(&self) -> bool {
        self.is_not_found
            || self.is_error
            || self.extracted_value.trim().is_empty()
            || self.extracted_value == WEB_STAGE_SKIPPED
            || is_empty_like(&self.extracted_value)
    }
}

/// Round a duration to two decimal places for recording.
pub fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
