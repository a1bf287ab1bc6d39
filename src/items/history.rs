//! History item representing a completed calculation.

use serde::Serialize;
use std::collections::VecDeque;
use tracing::warn;

use crate::calculator::format_display;

/// Upper bound on history entries; also the default.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A history item pairing the input label with its result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryItem {
    /// The expression (or derived-operation label) that was evaluated.
    pub input: String,
    /// The numeric result.
    pub output: f64,
}

impl HistoryItem {
    pub fn new(input: impl Into<String>, output: f64) -> Self {
        Self {
            input: input.into(),
            output,
        }
    }

    /// The result formatted for display (with thousand separators).
    pub fn display_result(&self) -> String {
        format_display(self.output)
    }
}

/// Bounded log of calculations, most recent first.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    items: VecDeque<HistoryItem>,
    limit: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryLog {
    /// Create an empty log holding at most `limit` items.
    ///
    /// A limit of zero falls back to the default; larger limits are capped
    /// at `DEFAULT_HISTORY_LIMIT`.
    pub fn new(limit: usize) -> Self {
        let limit = match limit {
            0 => DEFAULT_HISTORY_LIMIT,
            n if n > DEFAULT_HISTORY_LIMIT => {
                warn!(
                    "history limit {} exceeds {}; capping",
                    n, DEFAULT_HISTORY_LIMIT
                );
                DEFAULT_HISTORY_LIMIT
            }
            n => n,
        };
        Self {
            items: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    /// Record a new item at the front, evicting the oldest past the limit.
    pub fn push(&mut self, item: HistoryItem) {
        self.items.push_front(item);
        self.items.truncate(self.limit);
    }

    /// Iterate from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    /// The most recent item.
    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for HistoryLog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
