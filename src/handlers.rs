use serde_json::Value;
use std::sync::Arc;

use crate::confidence::ConfidenceLevel;
use crate::error::ThinkingResult;
use crate::models::{Envelope, FirstPrinciplesApplied, ThoughtRecord, ThoughtSummary};
use crate::session::{SessionSnapshot, SharedSession};
use crate::sink::ThoughtSink;
use crate::validation::validate_thought;
use crate::visual::ThoughtRenderer;

/// Runs one tool call: validate, record, optionally render, build the envelope.
///
/// Failures never escape as errors; they come back as a failure envelope.
/// A validation failure leaves the session untouched. A failure after the
/// thought was recorded (for example the sink refusing a write) is reported
/// but the recorded thought stays in the session.
pub struct ThoughtProcessor {
    session: SharedSession,
    renderer: ThoughtRenderer,
    sink: Option<Arc<dyn ThoughtSink>>,
}

impl ThoughtProcessor {
    /// `sink` is `None` when thought logging is disabled; nothing is rendered then.
    pub fn new(
        session: SharedSession,
        renderer: ThoughtRenderer,
        sink: Option<Arc<dyn ThoughtSink>>,
    ) -> Self {
        Self {
            session,
            renderer,
            sink,
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn thought_logging_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn process_thought(&self, payload: &Value) -> Envelope {
        match self.try_process(payload) {
            Ok(summary) => Envelope::Success(summary),
            Err(e) => {
                if e.is_validation() {
                    tracing::warn!("Rejected thought: {}", e);
                } else {
                    tracing::error!("Thought processing failed: {}", e);
                }
                Envelope::failure(e.to_string())
            }
        }
    }

    fn try_process(&self, payload: &Value) -> ThinkingResult<ThoughtSummary> {
        let mut record = validate_thought(payload)?;
        if record.thought_number > record.total_thoughts {
            record.total_thoughts = record.thought_number;
        }

        // History and branch appends happen under one lock
        let snapshot = self.session.lock().record(&record);

        tracing::debug!(
            "Recorded thought {} of {} (history: {}, branches: {})",
            record.thought_number,
            record.total_thoughts,
            snapshot.history_length,
            snapshot.branch_ids.len()
        );

        if let Some(sink) = &self.sink {
            sink.emit(&self.renderer.render(&record))?;
        }

        Ok(summarize(&record, snapshot))
    }
}

fn summarize(record: &ThoughtRecord, snapshot: SessionSnapshot) -> ThoughtSummary {
    ThoughtSummary {
        thought_number: record.thought_number,
        total_thoughts: record.total_thoughts,
        next_thought_needed: record.next_thought_needed,
        branches: snapshot.branch_ids,
        thought_history_length: snapshot.history_length,
        confidence_score: record.confidence_score,
        confidence_level: record.confidence_score.map(ConfidenceLevel::from_score),
        uncertainty_count: record.uncertainty_factors.as_ref().map(Vec::len),
        calibration_data: record.calibration_metrics.as_ref().map(|c| c.raw.clone()),
        first_principles_applied: record
            .first_principles
            .as_ref()
            .map(FirstPrinciplesApplied::from),
    }
}
