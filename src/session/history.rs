//! In-memory, append-only question/response history.

use chrono::{DateTime, Utc};

use crate::agent::AgentResponse;

/// One answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub question: String,
    pub response: AgentResponse,
    pub asked_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Time of day the answer arrived, e.g. `14:03:27 UTC`.
    pub fn time_label(&self) -> String {
        self.asked_at.format("%H:%M:%S UTC").to_string()
    }
}

/// Ordered by arrival. The only removal is [`History::clear`].
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return it.
    pub fn push(&mut self, question: impl Into<String>, response: AgentResponse) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            question: question.into(),
            response,
            asked_at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entries in arrival order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Entries newest first, each paired with its 1-based arrival number.
    pub fn latest_first(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .map(|(i, entry)| (i + 1, entry))
    }
}
