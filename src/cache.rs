use serde::{Deserialize, Serialize};

/// History of copied strings, oldest first.
///
/// Grows to twice the capacity, then drops the oldest half in one go.
/// Only a repeat of the newest entry is ignored; older duplicates stay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyCache {
    entries: Vec<String>,
}

impl CopyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// True when the next append drops the oldest half.
    pub fn is_full(&self, capacity: usize) -> bool {
        capacity.checked_mul(2) == Some(self.entries.len())
    }

    /// Returns true when the entry was stored.
    pub fn append(&mut self, text: &str, capacity: usize) -> bool {
        if self.is_full(capacity) {
            self.entries.drain(..capacity);
        }

        if self.last() == Some(text) {
            return false;
        }

        self.entries.push(text.to_string());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
