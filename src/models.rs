use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::confidence::ConfidenceLevel;

/// Validated thought as held in session state
#[derive(Debug, Clone, PartialEq)]
pub struct ThoughtRecord {
    pub thought: String,
    pub thought_number: u32,
    pub total_thoughts: u32,
    pub next_thought_needed: bool,
    pub structure: StructuralPointers,
    pub confidence_score: Option<f64>,
    pub confidence_reasoning: Option<String>,
    pub uncertainty_factors: Option<Vec<String>>,
    pub calibration_metrics: Option<CalibrationMetrics>,
    pub first_principles: Option<FirstPrinciples>,
}

/// Revision and branch pointers.
///
/// These fields are carried exactly as the caller sent them: no type or range
/// checks are applied, and presence is judged by JSON truthiness. Callers may
/// point at thoughts that never existed or reuse a branch id with a different
/// origin; none of that is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuralPointers {
    pub is_revision: Option<Value>,
    pub revises_thought: Option<Value>,
    pub branch_from_thought: Option<Value>,
    pub branch_id: Option<Value>,
    pub needs_more_thoughts: Option<Value>,
}

impl StructuralPointers {
    pub fn is_revision(&self) -> bool {
        self.is_revision.as_ref().is_some_and(truthy)
    }

    /// Branch origin, if one was given
    pub fn branch_origin(&self) -> Option<&Value> {
        self.branch_from_thought.as_ref().filter(|v| truthy(v))
    }

    /// Key of the branch bucket this thought belongs to. Requires both an
    /// origin and an id.
    pub fn branch_key(&self) -> Option<String> {
        self.branch_origin()?;
        self.branch_id
            .as_ref()
            .filter(|v| truthy(v))
            .map(display_value)
    }
}

/// Caller-supplied calibration data. `raw` is echoed back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationMetrics {
    pub previous_accuracy: Option<f64>,
    pub overconfidence_pattern: Option<Value>,
    pub uncertainty_awareness: Option<f64>,
    pub raw: Value,
}

impl CalibrationMetrics {
    pub fn flags_overconfidence(&self) -> bool {
        matches!(self.overconfidence_pattern, Some(Value::Bool(true)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirstPrinciples {
    pub assumptions_identified: Option<Vec<String>>,
    pub assumptions_challenged: Option<Vec<String>>,
    pub fundamental_truths: Option<Vec<String>>,
    pub analogies_avoided: Option<Vec<String>>,
    pub evidence_base: Option<Vec<String>>,
    pub reasoning_from_zero: Option<bool>,
    pub reconstructed_solution: Option<String>,
}

/// JavaScript-style truthiness, used for the unchecked pointer fields
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of an arbitrary value, strings without quotes.
///
/// Whole floats print without a fraction, so a branch id of `7.0` keys as `"7"`
/// like `7` does. Arrays and objects print as their JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Response envelope returned for every tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Success(ThoughtSummary),
    Failure(ThoughtFailure),
}

impl Envelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(ThoughtFailure {
            error: message.into(),
            status: "failed".to_string(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn to_json(&self) -> crate::error::ThinkingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtSummary {
    pub thought_number: u32,
    pub total_thoughts: u32,
    pub next_thought_needed: bool,
    pub branches: Vec<String>,
    pub thought_history_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<ConfidenceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_principles_applied: Option<FirstPrinciplesApplied>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstPrinciplesApplied {
    pub assumptions_count: usize,
    pub truths_count: usize,
    pub reasoning_from_zero: bool,
}

impl From<&FirstPrinciples> for FirstPrinciplesApplied {
    fn from(fp: &FirstPrinciples) -> Self {
        Self {
            assumptions_count: fp.assumptions_identified.as_ref().map_or(0, Vec::len),
            truths_count: fp.fundamental_truths.as_ref().map_or(0, Vec::len),
            reasoning_from_zero: fp.reasoning_from_zero.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThoughtFailure {
    pub error: String,
    pub status: String,
}

/// Raw tool arguments. Decoding never fails here; field rules are applied by
/// [`crate::validation::validate_thought`]. The advertised schema is the one
/// declared by [`ThoughtParams`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ThoughtPayload(pub Map<String, Value>);

impl ThoughtPayload {
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl JsonSchema for ThoughtPayload {
    fn schema_name() -> Cow<'static, str> {
        ThoughtParams::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        ThoughtParams::json_schema(generator)
    }
}

/// Parameter declaration for the sequentialthinking tool
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtParams {
    #[schemars(description = "Your current thinking step")]
    pub thought: String,

    #[schemars(description = "Whether another thought step is needed")]
    pub next_thought_needed: bool,

    #[schemars(description = "Current thought number", range(min = 1))]
    pub thought_number: u32,

    #[schemars(description = "Estimated total thoughts needed", range(min = 1))]
    pub total_thoughts: u32,

    #[schemars(description = "Whether this revises previous thinking")]
    pub is_revision: Option<bool>,

    #[schemars(description = "Which thought is being reconsidered", range(min = 1))]
    pub revises_thought: Option<u32>,

    #[schemars(description = "Branching point thought number", range(min = 1))]
    pub branch_from_thought: Option<u32>,

    #[schemars(description = "Branch identifier")]
    pub branch_id: Option<String>,

    #[schemars(description = "If more thoughts are needed")]
    pub needs_more_thoughts: Option<bool>,

    #[schemars(
        description = "Confidence in this thought from 0.0 to 1.0",
        range(min = 0.0, max = 1.0)
    )]
    pub confidence_score: Option<f64>,

    #[schemars(description = "Why you hold this level of confidence")]
    pub confidence_reasoning: Option<String>,

    #[schemars(description = "Factors that make this thought uncertain")]
    pub uncertainty_factors: Option<Vec<String>>,

    #[schemars(description = "Self-assessment of how well past confidence matched outcomes")]
    pub calibration_metrics: Option<CalibrationParams>,

    #[schemars(description = "First-principles analysis backing this thought")]
    pub first_principles: Option<FirstPrinciplesParams>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationParams {
    #[schemars(
        description = "Accuracy of previous confidence scores (0.0-1.0)",
        range(min = 0.0, max = 1.0)
    )]
    pub previous_accuracy: Option<f64>,

    #[schemars(description = "Whether a pattern of overconfidence has been observed")]
    pub overconfidence_pattern: Option<bool>,

    #[schemars(
        description = "Awareness of own uncertainty (0.0-1.0)",
        range(min = 0.0, max = 1.0)
    )]
    pub uncertainty_awareness: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirstPrinciplesParams {
    #[schemars(description = "Assumptions spotted in the current reasoning")]
    pub assumptions_identified: Option<Vec<String>>,

    #[schemars(description = "Assumptions that were questioned")]
    pub assumptions_challenged: Option<Vec<String>>,

    #[schemars(description = "Facts that hold regardless of the assumptions")]
    pub fundamental_truths: Option<Vec<String>>,

    #[schemars(description = "Analogies deliberately not relied on")]
    pub analogies_avoided: Option<Vec<String>>,

    #[schemars(description = "Evidence the reasoning rests on")]
    pub evidence_base: Option<Vec<String>>,

    #[schemars(description = "Whether the solution was rebuilt from fundamentals")]
    pub reasoning_from_zero: Option<bool>,

    #[schemars(description = "Solution reconstructed from the fundamental truths")]
    pub reconstructed_solution: Option<String>,
}
