use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::ConflictEngine;
use crate::result::ConflictSource;

/// Counts over the static rule space: every unordered pair of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_conflicts: usize,
    pub group_conflicts: usize,
    pub category_conflicts: usize,
    /// Keyed by the display category id of each conflicting pair.
    pub by_category: BTreeMap<String, usize>,
    /// Keyed by group name; category conflicts are not counted here.
    pub by_group: BTreeMap<String, usize>,
}

impl ConflictEngine {
    /// Recomputed on every call and independent of the history ledger.
    pub fn statistics(&self) -> Statistics {
        let ids: Vec<&str> = self.catalog().items().map(|i| i.id.as_str()).collect();
        let mut stats = Statistics::default();

        for result in self.evaluate_all(ids.as_slice()) {
            stats.total_conflicts += 1;
            *stats
                .by_category
                .entry(result.category.id.to_string())
                .or_default() += 1;
            match result.source {
                ConflictSource::Group { name } => {
                    stats.group_conflicts += 1;
                    *stats.by_group.entry(name).or_default() += 1;
                }
                ConflictSource::Category { .. } => stats.category_conflicts += 1,
            }
        }
        stats
    }
}
