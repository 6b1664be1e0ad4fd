//! Undo/redo history of full document snapshots.
//!
//! Two bounded stacks of serialized documents. `record` pushes onto `undo`
//! and empties `redo`; `undo` and `redo` move one snapshot between them.
//! When a stack outgrows `max_depth` the oldest entry is evicted.
//!
//! A snapshot is decoded before either stack is touched, so a corrupt entry
//! surfaces as an error and leaves both stacks exactly as they were.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::consts::MAX_HISTORY_DEPTH;
use crate::doc::{DocError, Document};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("snapshot holds an invalid document: {0}")]
    Invalid(#[from] DocError),
}

/// An immutable serialized copy of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Serialize the full document state.
    pub fn capture(doc: &Document) -> Result<Self, HistoryError> {
        serde_json::to_string(doc).map(Self).map_err(HistoryError::Encode)
    }

    /// Wrap an already serialized document without checking it.
    #[must_use]
    pub fn from_json(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    /// Decode the document and check its structural invariants.
    pub fn restore(&self) -> Result<Document, HistoryError> {
        let doc: Document = serde_json::from_str(&self.0).map_err(HistoryError::Decode)?;
        doc.validate()?;
        Ok(doc)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_DEPTH)
    }
}

impl History {
    /// Create empty stacks holding at most `max_depth` entries each (minimum 1).
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { undo: VecDeque::new(), redo: VecDeque::new(), max_depth: max_depth.max(1) }
    }

    /// Snapshot `doc` onto the undo stack and clear redo.
    pub fn record(&mut self, doc: &Document) -> Result<(), HistoryError> {
        let snapshot = Snapshot::capture(doc)?;
        self.push_snapshot(snapshot);
        Ok(())
    }

    /// Push an already captured snapshot onto the undo stack and clear redo.
    pub fn push_snapshot(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo, snapshot, self.max_depth);
        self.redo.clear();
        debug!(depth = self.undo.len(), "history: recorded");
    }

    /// Step back one state.
    ///
    /// `current` is saved onto redo and the previous document is returned.
    /// Returns `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, current: &Document) -> Result<Option<Document>, HistoryError> {
        let Some(top) = self.undo.back() else {
            return Ok(None);
        };
        let previous = top.restore().inspect_err(|e| warn!(error = %e, "history: undo snapshot is corrupt"))?;
        let current = Snapshot::capture(current)?;
        self.undo.pop_back();
        push_bounded(&mut self.redo, current, self.max_depth);
        debug!(undo = self.undo.len(), redo = self.redo.len(), "history: undo");
        Ok(Some(previous))
    }

    /// Step forward one state. Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<Option<Document>, HistoryError> {
        let Some(top) = self.redo.back() else {
            return Ok(None);
        };
        let next = top.restore().inspect_err(|e| warn!(error = %e, "history: redo snapshot is corrupt"))?;
        if let Some(snapshot) = self.redo.pop_back() {
            push_bounded(&mut self.undo, snapshot, self.max_depth);
        }
        debug!(undo = self.undo.len(), redo = self.redo.len(), "history: redo");
        Ok(Some(next))
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_depth: usize) {
    stack.push_back(snapshot);
    while stack.len() > max_depth {
        stack.pop_front();
    }
}
