use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::ConflictResult;

/// A recorded conflict and when it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub result: ConflictResult,
    pub recorded_at: DateTime<Utc>,
}

/// Per-reason counts over the entries currently held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub by_reason: BTreeMap<String, usize>,
}

/// Bounded FIFO log of positive conflict evaluations.
///
/// Once `max_size` is reached every append evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    max_size: usize,
}

impl HistoryLedger {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// Append a result. Results without a conflict are ignored and `false`
    /// is returned.
    pub fn push(&mut self, result: ConflictResult, recorded_at: DateTime<Utc>) -> bool {
        if !result.has_conflict {
            log::debug!(
                "Ignoring non-conflict history entry {} / {}",
                result.item_a,
                result.item_b
            );
            return false;
        }
        if self.max_size == 0 {
            return false;
        }
        while self.entries.len() >= self.max_size {
            if let Some(evicted) = self.entries.pop_front() {
                log::debug!(
                    "History full ({}), evicting {} / {}",
                    self.max_size,
                    evicted.result.item_a,
                    evicted.result.item_b
                );
            }
        }
        self.entries.push_back(HistoryEntry {
            result,
            recorded_at,
        });
        true
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn summary(&self) -> HistorySummary {
        let mut by_reason: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &self.entries {
            *by_reason.entry(entry.result.reason.clone()).or_default() += 1;
        }
        HistorySummary {
            total: self.entries.len(),
            by_reason,
        }
    }
}
