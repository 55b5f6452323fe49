//! Whole-set analysis: which items take part in conflicts, how they cluster,
//! and how much binder allowance a set needs.
//!
//! A binder relaxes conflicts: each binder level tolerates
//! `binder_conflicts_per_level` conflicting pairs. None of these operations
//! record history.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::engine::{dedup_ids, ConflictEngine};
use crate::result::ConflictResult;

/// Everything known about one item set, computed from a single pass over
/// its pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationReport {
    /// Normalized, de-duplicated input ids in input order.
    pub items: Vec<String>,
    pub conflict_count: usize,
    pub conflicts: Vec<ConflictResult>,
    pub clusters: Vec<Vec<String>>,
    pub conflict_map: BTreeMap<String, Vec<String>>,
    pub required_binder_slots: usize,
    pub min_binder_level: Option<u8>,
    /// No pair conflicts.
    pub is_compatible: bool,
    /// Some binder level within the maximum covers every conflict.
    pub binder_compatible: bool,
}

impl ConflictEngine {
    /// Ids that take part in at least one conflict, in input order.
    pub fn incompatible_items<S: AsRef<str>>(&self, ids: &[S]) -> Vec<String> {
        let conflicts = self.evaluate_all(ids);
        let involved: BTreeSet<&str> = conflicts
            .iter()
            .flat_map(|r| [r.item_a.as_str(), r.item_b.as_str()])
            .collect();
        dedup_ids(ids)
            .into_iter()
            .filter(|id| involved.contains(id.as_str()))
            .collect()
    }

    /// Connected components of the conflict graph over `ids`. Each cluster
    /// has at least two ids and is sorted; clusters are ordered by their
    /// first id.
    pub fn conflict_clusters<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Vec<String>> {
        clusters_of(&self.evaluate_all(ids))
    }

    /// For each id in `ids` that conflicts with something else in the set,
    /// the sorted ids it conflicts with. Ids with no conflict are absent.
    pub fn conflict_map<S: AsRef<str>>(&self, ids: &[S]) -> BTreeMap<String, Vec<String>> {
        map_of(&self.evaluate_all(ids))
    }

    /// Full analysis of `ids` without touching history.
    pub fn combination_report<S: AsRef<str>>(&self, ids: &[S]) -> CombinationReport {
        let conflicts = self.evaluate_all(ids);
        let required = conflicts.len();
        let min_binder_level = self.min_level_for(required);
        CombinationReport {
            items: dedup_ids(ids),
            conflict_count: required,
            clusters: clusters_of(&conflicts),
            conflict_map: map_of(&conflicts),
            required_binder_slots: required,
            min_binder_level,
            is_compatible: required == 0,
            binder_compatible: min_binder_level.is_some(),
            conflicts,
        }
    }

    /// Number of conflicting pairs a binder must absorb for `ids`.
    pub fn required_binder_slots<S: AsRef<str>>(&self, ids: &[S]) -> usize {
        self.evaluate_all(ids).len()
    }

    /// Whether a binder of `level` (clamped to the configured maximum)
    /// covers every conflict in `ids`.
    pub fn can_combine_with_binder<S: AsRef<str>>(&self, ids: &[S], level: u8) -> bool {
        let level = level.min(self.config().max_binder_level);
        self.required_binder_slots(ids) <= self.binder_allowance(level)
    }

    /// Smallest binder level that covers `ids`; `Some(0)` when nothing
    /// conflicts, `None` when even the maximum level is not enough.
    pub fn min_binder_level<S: AsRef<str>>(&self, ids: &[S]) -> Option<u8> {
        self.min_level_for(self.required_binder_slots(ids))
    }

    fn min_level_for(&self, required: usize) -> Option<u8> {
        (0..=self.config().max_binder_level).find(|&level| self.binder_allowance(level) >= required)
    }

    fn binder_allowance(&self, level: u8) -> usize {
        usize::from(level).saturating_mul(self.config().binder_conflicts_per_level)
    }
}

fn clusters_of(conflicts: &[ConflictResult]) -> Vec<Vec<String>> {
    let mut parent: BTreeMap<String, String> = BTreeMap::new();
    for r in conflicts {
        parent.entry(r.item_a.clone()).or_insert_with(|| r.item_a.clone());
        parent.entry(r.item_b.clone()).or_insert_with(|| r.item_b.clone());
    }
    for r in conflicts {
        let root_a = find_root(&parent, &r.item_a);
        let root_b = find_root(&parent, &r.item_b);
        if root_a != root_b {
            // Smaller id becomes the root so roots are deterministic.
            let (keep, merge) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            parent.insert(merge, keep);
        }
    }

    let mut clusters: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for id in parent.keys() {
        clusters
            .entry(find_root(&parent, id))
            .or_default()
            .push(id.clone());
    }
    clusters.into_values().collect()
}

fn map_of(conflicts: &[ConflictResult]) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for r in conflicts {
        map.entry(r.item_a.clone()).or_default().insert(r.item_b.clone());
        map.entry(r.item_b.clone()).or_default().insert(r.item_a.clone());
    }
    map.into_iter()
        .map(|(id, others)| (id, others.into_iter().collect()))
        .collect()
}

fn find_root(parent: &BTreeMap<String, String>, id: &str) -> String {
    let mut current = id;
    while let Some(next) = parent.get(current) {
        if next == current {
            break;
        }
        current = next;
    }
    current.to_string()
}
