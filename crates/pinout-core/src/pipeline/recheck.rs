//! Rollback rules shared by the final fallback and manual recheck.

use crate::types::{is_empty_like, round2, AttributeRecord, ExtractionStage, Outcome};

/// Whether a recheck result must be discarded in favour of the stored record.
///
/// A recheck is only allowed to improve or confirm an answer, never to
/// replace it with something worse. Two cases discard the new result:
/// the recheck itself failed (any outcome carrying a parse diagnostic,
/// including rate limits and backend errors), or the stored value was an
/// empty-like answer ("none", "null", "n/a") and the recheck again found
/// nothing, which confirms the stored answer rather than contradicting it.
pub fn should_rollback(
    original: &AttributeRecord,
    new_outcome: &Outcome,
    stage: ExtractionStage,
) -> bool {
    new_outcome.parse_error(stage).is_some()
        || (is_empty_like(&original.extracted_value) && new_outcome.is_not_found())
}

/// Fold one recheck invocation into the stored record.
///
/// On rollback the stored record survives unchanged, value, source, raw
/// output, and flags alike. Latency is the one exception: the recheck's
/// duration is added to the running total whichever value wins.
pub fn apply_recheck(
    original: &AttributeRecord,
    new_outcome: &Outcome,
    raw_output: &str,
    stage: ExtractionStage,
    run_seconds: f64,
) -> AttributeRecord {
    let total_latency = round2(original.latency_seconds + round2(run_seconds));
    if should_rollback(original, new_outcome, stage) {
        let mut restored = original.clone();
        restored.latency_seconds = total_latency;
        restored
    } else {
        AttributeRecord::from_outcome(
            original.prompt_name.as_str(),
            stage,
            new_outcome,
            raw_output,
            total_latency,
        )
    }
}
