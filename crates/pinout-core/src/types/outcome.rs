//! Extraction outcomes as a tagged union.
//!
//! Every stage classifies the raw model output into an [`Outcome`] first;
//! the display value, parse diagnostic, and status flags are all derived
//! from the variant at the edge instead of being threaded around as bare
//! strings. Stage-specific rendering (the " (Final)" and " (Manual)"
//! sentinels) lives here in one place.

use serde::{Deserialize, Serialize};

use super::record::ExtractionSource;

/// Which pass of the pipeline produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    /// Stage 1, extraction from cleaned website data.
    Web,
    /// Stage 2 fallback, extraction from retrieved PDF context.
    PdfFallback,
    /// Stage 3, the final recheck over PDF context.
    FinalFallback,
    /// User-initiated recheck over PDF context.
    ManualRecheck,
}

impl ExtractionStage {
    /// Human-readable stage label used in parse diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Web => "Stage 1",
            Self::PdfFallback => "Stage 2",
            Self::FinalFallback => "Stage 3",
            Self::ManualRecheck => "Manual Recheck",
        }
    }

    /// Suffix appended to sentinel values produced by this stage.
    pub fn sentinel_suffix(&self) -> &'static str {
        match self {
            Self::Web | Self::PdfFallback => "",
            Self::FinalFallback => " (Final)",
            Self::ManualRecheck => " (Manual)",
        }
    }

    /// Recheck stages additionally treat "none"-like answers as not found.
    pub fn lenient_empty_like(&self) -> bool {
        matches!(self, Self::FinalFallback | Self::ManualRecheck)
    }

    /// Source recorded when a result from this stage is adopted.
    pub fn source(&self) -> ExtractionSource {
        match self {
            Self::Web => ExtractionSource::Web,
            Self::PdfFallback => ExtractionSource::Pdf,
            Self::FinalFallback => ExtractionSource::FinalFallback,
            Self::ManualRecheck => ExtractionSource::ManualRecheck,
        }
    }
}

/// Why a response failed shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedKind {
    /// No parseable JSON object in the response.
    NotAnObject,
    /// A JSON object, but without the requested attribute key.
    UnexpectedKeys(Vec<String>),
}

/// Classified result of a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The model answered with a usable value.
    Found(String),
    /// The model answered, but the answer means "not found".
    /// `reported` keeps the verbatim answer for stages that display it.
    NotFound { reported: String },
    /// The response was not a single-key JSON object.
    Malformed(MalformedKind),
    /// The backend reported a rate limit.
    RateLimited,
    /// The backend reported an error.
    BackendError(String),
    /// Processing the response itself failed.
    Failed(String),
}

impl Outcome {
    /// Render the display value for this outcome under the given stage.
    pub fn render_value(&self, stage: ExtractionStage) -> String {
        let suffix = stage.sentinel_suffix();
        match self {
            Outcome::Found(value) => value.clone(),
            Outcome::NotFound { reported } => match stage {
                // The PDF fallback keeps the model's own phrasing.
                ExtractionStage::PdfFallback => reported.clone(),
                _ => format!("NOT FOUND{}", suffix),
            },
            Outcome::Malformed(MalformedKind::NotAnObject) => match stage {
                ExtractionStage::Web => "Unexpected JSON Type".to_string(),
                _ => format!("Unexpected JSON Format{}", suffix),
            },
            Outcome::Malformed(MalformedKind::UnexpectedKeys(_)) => {
                format!("Unexpected JSON Format{}", suffix)
            }
            Outcome::RateLimited => "Rate Limit Hit".to_string(),
            Outcome::BackendError(message) => {
                format!("Error: {}", truncate_chars(message, 100))
            }
            Outcome::Failed(_) => format!("Processing Error{}", suffix),
        }
    }

    /// Render the parse diagnostic for this outcome, if any.
    pub fn parse_error(&self, stage: ExtractionStage) -> Option<String> {
        let label = stage.label();
        match self {
            Outcome::Found(_) | Outcome::NotFound { .. } => None,
            Outcome::Malformed(MalformedKind::NotAnObject) => match stage {
                ExtractionStage::Web => {
                    Some(format!("{} Expected a JSON object in the response", label))
                }
                _ => Some(format!("{} Unexpected JSON format", label)),
            },
            Outcome::Malformed(MalformedKind::UnexpectedKeys(keys)) => match stage {
                ExtractionStage::Web => {
                    Some(format!("{} Unexpected JSON keys: {:?}", label, keys))
                }
                _ => Some(format!("{} Unexpected JSON format", label)),
            },
            Outcome::RateLimited => match stage {
                ExtractionStage::Web => Some("Rate limit hit (Web)".to_string()),
                _ => Some(format!("{} Rate limit hit", label)),
            },
            Outcome::BackendError(message) => Some(format!("{} Error: {}", label, message)),
            Outcome::Failed(detail) => Some(detail.clone()),
        }
    }

    /// Whether this outcome classifies as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound { .. })
    }

    /// Whether this outcome is a rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Outcome::RateLimited)
    }
}

/// Truncate to at most `max` characters without splitting a code point.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Whether a model answer means "not found" (case-insensitive phrase match).
pub fn is_not_found_text(text: &str) -> bool {
    text.to_lowercase().contains("not found")
}

/// Whether a value is one of the semantically empty answers that the
/// recheck stages re-verify instead of trusting.
pub fn is_empty_like(text: &str) -> bool {
    matches!(text.to_lowercase().as_str(), "none" | "null" | "n/a" | "na")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_renders_verbatim_everywhere() {
        let outcome = Outcome::Found("Female".to_string());
        assert_eq!(outcome.render_value(ExtractionStage::Web), "Female");
        assert_eq!(outcome.render_value(ExtractionStage::FinalFallback), "Female");
        assert!(outcome.parse_error(ExtractionStage::Web).is_none());
    }

    #[test]
    fn test_not_found_rendering_per_stage() {
        let outcome = Outcome::NotFound {
            reported: "not found in document".to_string(),
        };
        assert_eq!(outcome.render_value(ExtractionStage::Web), "NOT FOUND");
        assert_eq!(
            outcome.render_value(ExtractionStage::PdfFallback),
            "not found in document"
        );
        assert_eq!(
            outcome.render_value(ExtractionStage::FinalFallback),
            "NOT FOUND (Final)"
        );
        assert_eq!(
            outcome.render_value(ExtractionStage::ManualRecheck),
            "NOT FOUND (Manual)"
        );
    }

    #[test]
    fn test_malformed_rendering_per_stage() {
        let outcome = Outcome::Malformed(MalformedKind::NotAnObject);
        assert_eq!(outcome.render_value(ExtractionStage::Web), "Unexpected JSON Type");
        assert_eq!(
            outcome.render_value(ExtractionStage::PdfFallback),
            "Unexpected JSON Format"
        );
        assert_eq!(
            outcome.render_value(ExtractionStage::FinalFallback),
            "Unexpected JSON Format (Final)"
        );

        let keys = Outcome::Malformed(MalformedKind::UnexpectedKeys(vec!["foo".to_string()]));
        assert_eq!(keys.render_value(ExtractionStage::Web), "Unexpected JSON Format");
        assert!(keys
            .parse_error(ExtractionStage::Web)
            .unwrap()
            .contains("Unexpected JSON keys"));
    }

    #[test]
    fn test_backend_error_truncates_to_100_chars() {
        let long = "x".repeat(150);
        let outcome = Outcome::BackendError(long.clone());
        let rendered = outcome.render_value(ExtractionStage::Web);
        assert_eq!(rendered, format!("Error: {}", "x".repeat(100)));
        // Diagnostic keeps the full message.
        assert!(outcome
            .parse_error(ExtractionStage::Web)
            .unwrap()
            .contains(&long));
    }

    #[test]
    fn test_rate_limited_has_no_suffix() {
        let outcome = Outcome::RateLimited;
        assert_eq!(outcome.render_value(ExtractionStage::Web), "Rate Limit Hit");
        assert_eq!(
            outcome.render_value(ExtractionStage::PdfFallback),
            "Rate Limit Hit"
        );
        assert!(outcome.is_rate_limited());
        assert_eq!(
            outcome.parse_error(ExtractionStage::Web).as_deref(),
            Some("Rate limit hit (Web)")
        );
        assert_eq!(
            outcome.parse_error(ExtractionStage::PdfFallback).as_deref(),
            Some("Stage 2 Rate limit hit")
        );
    }

    #[test]
    fn test_failed_rendering() {
        let outcome = Outcome::Failed("boom".to_string());
        assert_eq!(outcome.render_value(ExtractionStage::Web), "Processing Error");
        assert_eq!(
            outcome.render_value(ExtractionStage::ManualRecheck),
            "Processing Error (Manual)"
        );
        assert_eq!(outcome.parse_error(ExtractionStage::Web).as_deref(), Some("boom"));
    }

    #[test]
    fn test_not_found_text_predicate() {
        assert!(is_not_found_text("NOT FOUND"));
        assert!(is_not_found_text("value was Not Found in the document"));
        assert!(!is_not_found_text("Female"));
    }

    #[test]
    fn test_empty_like_predicate() {
        assert!(is_empty_like("none"));
        assert!(is_empty_like("None"));
        assert!(is_empty_like("NULL"));
        assert!(is_empty_like("N/A"));
        assert!(is_empty_like("na"));
        assert!(!is_empty_like("nano"));
        assert!(!is_empty_like(""));
    }
}
