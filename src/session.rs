use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::ThoughtRecord;

/// Session state shared between the service and the processor
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Thought history plus branch buckets for one server process.
///
/// Append-only and unbounded: nothing is ever evicted, so memory grows with
/// the number of thoughts recorded until the process exits.
#[derive(Debug, Default)]
pub struct SessionState {
    history: Vec<ThoughtRecord>,
    branches: IndexMap<String, Vec<ThoughtRecord>>,
}

/// View of the session taken right after a thought was recorded
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub history_length: usize,
    pub branch_ids: Vec<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn append(&mut self, record: ThoughtRecord) {
        self.history.push(record);
    }

    /// Appends to the named branch, creating the bucket on first use
    pub fn append_to_branch(&mut self, branch_id: &str, record: ThoughtRecord) {
        self.branches
            .entry(branch_id.to_string())
            .or_default()
            .push(record);
    }

    /// Adds a thought to the history and, when it carries a branch origin and
    /// id, to that branch as well.
    pub fn record(&mut self, record: &ThoughtRecord) -> SessionSnapshot {
        self.append(record.clone());
        if let Some(branch_id) = record.structure.branch_key() {
            self.append_to_branch(&branch_id, record.clone());
        }

        SessionSnapshot {
            history_length: self.history_len(),
            branch_ids: self.branch_ids(),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Branch ids in first-seen order
    pub fn branch_ids(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }

    pub fn history(&self) -> &[ThoughtRecord] {
        &self.history
    }

    pub fn branch(&self, branch_id: &str) -> Option<&[ThoughtRecord]> {
        self.branches.get(branch_id).map(Vec::as_slice)
    }

    pub fn branch_len(&self, branch_id: &str) -> usize {
        self.branch(branch_id).map_or(0, |b| b.len())
    }
}
