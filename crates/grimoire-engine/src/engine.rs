use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use grimoire_core::catalog::CatalogIndex;
use grimoire_core::category::{CategoryId, CategoryInfo};
use grimoire_core::constants::CATEGORY_CONFLICT_REASON;
use grimoire_core::item::{normalize_id, Item};
use grimoire_core::rule::ConflictGroup;
use grimoire_rules::defaults;
use grimoire_rules::loader::LoadError;
use grimoire_rules::table::RuleTable;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::history::{HistoryEntry, HistoryLedger, HistorySummary};
use crate::result::{ConflictResult, ConflictSource};

/// One thing an item conflicts with across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictEntry {
    /// A named group covering the item. `members` includes the item itself.
    Group {
        name: String,
        reason: String,
        description: String,
        category: CategoryInfo,
        members: Vec<String>,
    },
    /// A category the item's category conflicts with, and the catalog items
    /// in it.
    Category {
        category: CategoryInfo,
        items: Vec<String>,
    },
}

/// Conflict evaluation over a catalog and rule table.
///
/// The catalog and rules are immutable after construction and shared by
/// `Arc`. The history ledger is the only mutable state and sits behind a
/// mutex, so a `&ConflictEngine` can be used from several threads.
pub struct ConflictEngine {
    catalog: Arc<CatalogIndex>,
    rules: Arc<RuleTable>,
    config: EngineConfig,
    history: Mutex<HistoryLedger>,
}

impl ConflictEngine {
    pub fn new(catalog: Arc<CatalogIndex>, rules: Arc<RuleTable>, config: EngineConfig) -> Self {
        log::info!(
            "Conflict engine ready: {} items in {} categories, {} rule entries, {} groups",
            catalog.len(),
            catalog.categories().count(),
            rules.entries().count(),
            rules.groups().len()
        );
        let history = Mutex::new(HistoryLedger::new(config.max_history));
        Self {
            catalog,
            rules,
            config,
            history,
        }
    }

    /// Engine over the bundled catalog and rule data.
    pub fn with_defaults(config: EngineConfig) -> Result<Self, LoadError> {
        let catalog = defaults::default_catalog()?;
        let rules = defaults::default_rule_table()?;
        Ok(Self::new(Arc::new(catalog), Arc::new(rules), config))
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a pair without touching the history.
    ///
    /// Blank, unknown and identical ids yield `None`. Group membership takes
    /// precedence over category rules.
    pub fn evaluate(&self, a: &str, b: &str) -> Option<ConflictResult> {
        let a = normalize_id(a)?;
        let b = normalize_id(b)?;
        if a == b {
            return None;
        }
        let item_a = self.catalog.lookup(&a)?;
        let item_b = self.catalog.lookup(&b)?;

        if let Some(group) = self.rules.shared_group(&a, &b) {
            return Some(self.group_result(item_a, item_b, group));
        }

        // Both sides are consulted; the smaller declaring category keeps the
        // result independent of argument order.
        let declared_by = self
            .rules
            .conflict_declarers(&item_a.category, &item_b.category)
            .into_iter()
            .min()?
            .clone();
        Some(self.category_result(item_a, item_b, declared_by))
    }

    fn group_result(&self, a: &Item, b: &Item, group: &ConflictGroup) -> ConflictResult {
        let description = if group.description.trim().is_empty() {
            group.reason.clone()
        } else {
            group.description.clone()
        };
        ConflictResult::conflict(
            &a.id,
            &b.id,
            ConflictSource::Group {
                name: group.name.clone(),
            },
            group.reason.clone(),
            description,
            self.group_category(group),
        )
    }

    fn category_result(&self, a: &Item, b: &Item, declared_by: CategoryId) -> ConflictResult {
        let (first, second) = if a.id <= b.id { (a, b) } else { (b, a) };
        let description = format!(
            "{} ({}) cannot be combined with {} ({})",
            first.name, first.category, second.name, second.category
        );
        let category = self.catalog.category_info(&declared_by);
        ConflictResult::conflict(
            &a.id,
            &b.id,
            ConflictSource::Category { declared_by },
            CATEGORY_CONFLICT_REASON,
            description,
            category,
        )
    }

    /// Display category of a group: the category of its first member that
    /// resolves in the catalog.
    fn group_category(&self, group: &ConflictGroup) -> CategoryInfo {
        group
            .items
            .iter()
            .find_map(|id| self.catalog.lookup(id))
            .map(|item| self.catalog.category_info(&item.category))
            .unwrap_or_else(|| CategoryInfo::unknown(CategoryId::from("unknown")))
    }

    /// Evaluate a pair and record a positive result in the history.
    pub fn check_conflict(&self, a: &str, b: &str) -> Option<ConflictResult> {
        let result = self.evaluate(a, b)?;
        if self.config.record_history {
            self.ledger().push(result.clone(), Utc::now());
        }
        Some(result)
    }

    /// Every conflicting pair in `ids`, each unordered pair checked once.
    ///
    /// Ids are normalized and deduplicated first. Results are sorted by pair
    /// so the output does not depend on input order.
    pub fn check_multiple_conflicts<S: AsRef<str>>(&self, ids: &[S]) -> Vec<ConflictResult> {
        self.scan_pairs(ids, |a, b| self.check_conflict(a, b))
    }

    /// Like `check_multiple_conflicts`, without recording history.
    pub(crate) fn evaluate_all<S: AsRef<str>>(&self, ids: &[S]) -> Vec<ConflictResult> {
        self.scan_pairs(ids, |a, b| self.evaluate(a, b))
    }

    fn scan_pairs<S, F>(&self, ids: &[S], check: F) -> Vec<ConflictResult>
    where
        S: AsRef<str>,
        F: Fn(&str, &str) -> Option<ConflictResult>,
    {
        let unique = dedup_ids(ids);
        let mut results = Vec::new();
        for (i, a) in unique.iter().enumerate() {
            for b in &unique[i + 1..] {
                if let Some(result) = check(a.as_str(), b.as_str()) {
                    results.push(result);
                }
            }
        }
        results.sort_by(|x, y| x.pair().cmp(&y.pair()));
        results
    }

    /// True when no pair in `ids` conflicts.
    pub fn can_coexist<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.check_multiple_conflicts(ids).is_empty()
    }

    /// Everything `id` conflicts with across the full catalog: its groups in
    /// declaration order, then conflicting categories in category order.
    pub fn get_conflicts(&self, id: &str) -> Vec<ConflictEntry> {
        let Some(item) = self.catalog.lookup(id) else {
            return Vec::new();
        };
        let mut entries = Vec::new();

        for group in self.rules.groups_containing(&item.id) {
            let mut members: Vec<String> = Vec::new();
            for member in group.items.iter().filter_map(|m| normalize_id(m)) {
                if !members.contains(&member) {
                    members.push(member);
                }
            }
            entries.push(ConflictEntry::Group {
                name: group.name.clone(),
                reason: group.reason.clone(),
                description: group.description.clone(),
                category: self.group_category(group),
                members,
            });
        }

        for category in self.rules.conflicting_categories(&item.category) {
            let items: Vec<String> = self
                .catalog
                .items_in(&category)
                .iter()
                .filter(|other| **other != item.id)
                .cloned()
                .collect();
            entries.push(ConflictEntry::Category {
                category: self.catalog.category_info(&category),
                items,
            });
        }

        entries
    }

    /// Display name for an item, `None` when the id is unknown.
    pub fn item_name(&self, id: &str, localized: bool) -> Option<String> {
        self.catalog
            .lookup(id)
            .map(|item| item.display_name(localized).to_string())
    }

    /// Record an externally produced result. Returns whether it was kept.
    pub fn add_to_history(&self, result: ConflictResult) -> bool {
        self.ledger().push(result, Utc::now())
    }

    /// History snapshot, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.ledger().entries().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.ledger().clear();
    }

    /// Counts of observed conflicts per reason. Unrelated to `statistics`,
    /// which describes the rule space.
    pub fn history_summary(&self) -> HistorySummary {
        self.ledger().summary()
    }

    fn ledger(&self) -> MutexGuard<'_, HistoryLedger> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Normalize ids, dropping blanks and repeats while keeping first-seen
/// order.
pub(crate) fn dedup_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter_map(|id| normalize_id(id.as_ref()))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
