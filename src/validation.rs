//! Decode-and-validate boundary for thought payloads.
//!
//! Rules run in a fixed order and the first violation is returned. The core
//! fields and the confidence/first-principles metadata are strictly typed;
//! revision and branch pointers are passed through without any checks.
//! JSON `null` on an optional field counts as absent.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::{CalibrationMetrics, FirstPrinciples, StructuralPointers, ThoughtRecord};

type Fields = Map<String, Value>;

pub fn validate_thought(payload: &Value) -> Result<ThoughtRecord, ValidationError> {
    let fields = payload
        .as_object()
        .ok_or(ValidationError::NotAnObject { field: "arguments" })?;

    let thought = match present(fields, "thought") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(ValidationError::NotAString { field: "thought" }),
    };
    let thought_number = positive_integer(fields, "thoughtNumber")?;
    let total_thoughts = positive_integer(fields, "totalThoughts")?;
    let next_thought_needed = match present(fields, "nextThoughtNeeded") {
        Some(Value::Bool(b)) => *b,
        _ => return Err(ValidationError::NotABoolean { field: "nextThoughtNeeded" }),
    };

    let confidence_score = unit_interval(present(fields, "confidenceScore"), "confidenceScore")?;
    let confidence_reasoning =
        optional_string(present(fields, "confidenceReasoning"), "confidenceReasoning")?;
    let uncertainty_factors =
        string_list(present(fields, "uncertaintyFactors"), "uncertaintyFactors")?;
    let calibration_metrics = present(fields, "calibrationMetrics")
        .map(calibration)
        .transpose()?;
    let first_principles = present(fields, "firstPrinciples")
        .map(first_principles)
        .transpose()?;

    Ok(ThoughtRecord {
        thought,
        thought_number,
        total_thoughts,
        next_thought_needed,
        structure: StructuralPointers {
            is_revision: fields.get("isRevision").cloned(),
            revises_thought: fields.get("revisesThought").cloned(),
            branch_from_thought: fields.get("branchFromThought").cloned(),
            branch_id: fields.get("branchId").cloned(),
            needs_more_thoughts: fields.get("needsMoreThoughts").cloned(),
        },
        confidence_score,
        confidence_reasoning,
        uncertainty_factors,
        calibration_metrics,
        first_principles,
    })
}

fn present<'a>(fields: &'a Fields, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// Accepts any JSON number holding a whole value >= 1, so `3.0` reads as 3.
///
/// Anything else fails with the plain "must be a number" message, including
/// numbers that are well formed but not usable as a position: `0`, negatives,
/// fractions, and values beyond `u32::MAX`.
fn positive_integer(fields: &Fields, field: &'static str) -> Result<u32, ValidationError> {
    let number = match present(fields, field) {
        Some(Value::Number(n)) => n,
        _ => return Err(ValidationError::NotANumber { field }),
    };
    if let Some(n) = number.as_u64() {
        return u32::try_from(n)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(ValidationError::NotANumber { field });
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 1.0 && f <= f64::from(u32::MAX) => Ok(f as u32),
        _ => Err(ValidationError::NotANumber { field }),
    }
}

fn unit_interval(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<f64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .filter(|f| (0.0..=1.0).contains(f))
            .map(Some)
            .ok_or(ValidationError::OutOfUnitRange { field }),
    }
}

fn optional_string(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}

fn optional_bool(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<bool>, ValidationError> {
    match value {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ValidationError::NotABoolean { field }),
    }
}

fn string_list(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<Vec<String>>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or(ValidationError::NotAStringList { field })?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(ValidationError::NotAStringList { field })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn calibration(value: &Value) -> Result<CalibrationMetrics, ValidationError> {
    let fields = value
        .as_object()
        .ok_or(ValidationError::NotAnObject { field: "calibrationMetrics" })?;

    Ok(CalibrationMetrics {
        previous_accuracy: unit_interval(
            present(fields, "previousAccuracy"),
            "calibrationMetrics.previousAccuracy",
        )?,
        // Deliberately unchecked
        overconfidence_pattern: fields.get("overconfidencePattern").cloned(),
        uncertainty_awareness: unit_interval(
            present(fields, "uncertaintyAwareness"),
            "calibrationMetrics.uncertaintyAwareness",
        )?,
        raw: value.clone(),
    })
}

fn first_principles(value: &Value) -> Result<FirstPrinciples, ValidationError> {
    let fields = value
        .as_object()
        .ok_or(ValidationError::NotAnObject { field: "firstPrinciples" })?;

    Ok(FirstPrinciples {
        assumptions_identified: string_list(
            present(fields, "assumptionsIdentified"),
            "firstPrinciples.assumptionsIdentified",
        )?,
        assumptions_challenged: string_list(
            present(fields, "assumptionsChallenged"),
            "firstPrinciples.assumptionsChallenged",
        )?,
        fundamental_truths: string_list(
            present(fields, "fundamentalTruths"),
            "firstPrinciples.fundamentalTruths",
        )?,
        analogies_avoided: string_list(
            present(fields, "analogiesAvoided"),
            "firstPrinciples.analogiesAvoided",
        )?,
        evidence_base: string_list(
            present(fields, "evidenceBase"),
            "firstPrinciples.evidenceBase",
        )?,
        reasoning_from_zero: optional_bool(
            present(fields, "reasoningFromZero"),
            "firstPrinciples.reasoningFromZero",
        )?,
        reconstructed_solution: optional_string(
            present(fields, "reconstructedSolution"),
            "firstPrinciples.reconstructedSolution",
        )?,
    })
}
