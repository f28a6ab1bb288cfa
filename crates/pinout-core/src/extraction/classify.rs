//! Classification of raw LLM responses into extraction outcomes.

use serde_json::Value;

use crate::extraction::json_parser::extract_json_object;
use crate::types::{is_empty_like, ExtractionStage, MalformedKind, Outcome};

/// Classify a raw model response for one attribute.
///
/// The response is expected to carry a single-key JSON object. The
/// attribute key wins over everything else; an `error` key is only
/// consulted when the attribute key is absent, which also covers the
/// synthesized error payloads produced when a backend call fails.
pub fn classify_raw(raw_output: &str, attribute_key: &str, stage: ExtractionStage) -> Outcome {
    let Some(parsed) = extract_json_object(raw_output) else {
        return Outcome::Malformed(MalformedKind::NotAnObject);
    };

    if let Some(value) = parsed.get(attribute_key) {
        let text = value_text(value);
        if text.to_lowercase().contains("not found") || text.trim().is_empty() {
            return Outcome::NotFound { reported: text };
        }
        if stage.lenient_empty_like() && is_empty_like(text.trim()) {
            return Outcome::NotFound { reported: text };
        }
        return Outcome::Found(text);
    }

    if let Some(error_value) = parsed.get("error") {
        return match error_value {
            Value::String(message) => {
                if message.to_lowercase().contains("rate limit") {
                    Outcome::RateLimited
                } else {
                    Outcome::BackendError(message.clone())
                }
            }
            other => Outcome::Failed(format!(
                "{} error field was not a string: {}",
                stage.label(),
                other
            )),
        };
    }

    Outcome::Malformed(MalformedKind::UnexpectedKeys(
        parsed.keys().cloned().collect(),
    ))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_value() {
        let outcome = classify_raw(r#"{"Gender": "male"}"#, "Gender", ExtractionStage::Web);
        assert_eq!(outcome, Outcome::Found("male".to_string()));
    }

    #[test]
    fn test_not_found_phrase_and_blank() {
        for raw in [r#"{"Gender": "NOT FOUND"}"#, r#"{"Gender": "  "}"#] {
            let outcome = classify_raw(raw, "Gender", ExtractionStage::Web);
            assert!(outcome.is_not_found(), "expected not-found for {raw}");
        }
    }

    #[test]
    fn test_not_found_phrase_is_case_insensitive() {
        let outcome = classify_raw(
            r#"{"Gender": "the value was Not Found in the text"}"#,
            "Gender",
            ExtractionStage::Web,
        );
        assert!(outcome.is_not_found());
    }

    #[test]
    fn test_empty_like_is_a_valid_answer_outside_rechecks() {
        let outcome = classify_raw(r#"{"Colour Coding": "None"}"#, "Colour Coding", ExtractionStage::Web);
        assert_eq!(outcome, Outcome::Found("None".to_string()));

        let outcome = classify_raw(
            r#"{"Colour Coding": "None"}"#,
            "Colour Coding",
            ExtractionStage::FinalFallback,
        );
        assert!(outcome.is_not_found());
    }

    #[test]
    fn test_numeric_value_is_rendered() {
        let outcome = classify_raw(r#"{"Height [MM]": 21.5}"#, "Height [MM]", ExtractionStage::Web);
        assert_eq!(outcome, Outcome::Found("21.5".to_string()));
    }

    #[test]
    fn test_rate_limit_detected_at_every_stage() {
        let raw = r#"{"error": "Rate limit exceeded: retry in 20s"}"#;
        for stage in [
            ExtractionStage::Web,
            ExtractionStage::PdfFallback,
            ExtractionStage::FinalFallback,
        ] {
            assert_eq!(
                classify_raw(raw, "Gender", stage),
                Outcome::RateLimited,
                "stage {:?}",
                stage
            );
        }
    }

    #[test]
    fn test_non_throttling_error_stays_an_error() {
        let raw = r#"{"error": "upstream timeout"}"#;
        assert_eq!(
            classify_raw(raw, "Gender", ExtractionStage::PdfFallback),
            Outcome::BackendError("upstream timeout".to_string())
        );
    }

    #[test]
    fn test_error_key_ignored_when_attribute_present() {
        let raw = r#"{"Gender": "female", "error": "leftover"}"#;
        assert_eq!(
            classify_raw(raw, "Gender", ExtractionStage::Web),
            Outcome::Found("female".to_string())
        );
    }

    #[test]
    fn test_unexpected_keys() {
        let outcome = classify_raw(r#"{"gender": "male"}"#, "Gender", ExtractionStage::Web);
        assert_eq!(
            outcome,
            Outcome::Malformed(MalformedKind::UnexpectedKeys(vec!["gender".to_string()]))
        );
    }

    #[test]
    fn test_unparseable_response() {
        let outcome = classify_raw("no json here", "Gender", ExtractionStage::Web);
        assert_eq!(outcome, Outcome::Malformed(MalformedKind::NotAnObject));
    }

    #[test]
    fn test_non_string_error_field() {
        let outcome = classify_raw(r#"{"error": {"code": 500}}"#, "Gender", ExtractionStage::Web);
        assert!(matches!(outcome, Outcome::Failed(_)));
    }

    #[test]
    fn test_think_block_before_answer() {
        let raw = "<think>checking the drawing</think>\n{\"Gender\": \"male\"}";
        assert_eq!(
            classify_raw(raw, "Gender", ExtractionStage::Web),
            Outcome::Found("male".to_string())
        );
    }
}
