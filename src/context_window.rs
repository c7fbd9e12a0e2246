//! Bounded window of a side's most recent statements.
//!
//! Each side owns one window holding its *own* latest regular-round
//! statements. The opposing side reads it as opponent context.

use std::collections::VecDeque;

/// Stand-in for opponent context when nothing has been said yet
pub const NO_PRIOR_STATEMENT: &str = "(no prior statement)";

/// FIFO of at most `capacity` utterances, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    capacity: usize,
    entries: VecDeque<String>,
}

impl ContextWindow {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, utterance: impl Into<String>) {
        self.entries.push_back(utterance.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Retained utterances in chronological order, newline-joined, or
    /// [`NO_PRIOR_STATEMENT`] when empty.
    pub fn snapshot(&self) -> String {
        if self.entries.is_empty() {
            return NO_PRIOR_STATEMENT.to_string();
        }
        self.entries
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
