use std::collections::HashSet;

use grimoire_core::catalog::CatalogIndex;
use grimoire_core::category::CategoryId;
use grimoire_core::constants::MIN_GROUP_SIZE;
use grimoire_core::item::normalize_id;
use serde::Serialize;
use thiserror::Error;

use crate::table::RuleTable;

/// How much a validation issue matters. Warnings describe data the engine
/// tolerates by treating it as "no relationship"; errors make the rule set
/// invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Level issues of this severity are logged at.
    pub fn log_level(self) -> log::Level {
        match self {
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Category '{category}' references undeclared category '{referenced}'")]
    DanglingCategoryRef {
        category: CategoryId,
        referenced: CategoryId,
    },
    #[error("Category '{category}' lists '{other}' as a conflict but '{other}' does not list it back")]
    AsymmetricConflict {
        category: CategoryId,
        other: CategoryId,
    },
    #[error("Category '{category}' lists '{other}' as both conflicting and compatible")]
    ContradictoryRelation {
        category: CategoryId,
        other: CategoryId,
    },
    #[error("Catalog category '{0}' has no rule entry")]
    UndeclaredCategory(CategoryId),
    #[error("Group '{group}' references unknown item '{item}'")]
    UnknownGroupItem { group: String, item: String },
    #[error("Group '{group}' covers {count} distinct items (minimum {min})")]
    UndersizedGroup {
        group: String,
        count: usize,
        min: usize,
    },
    #[error("Duplicate group name '{0}'")]
    DuplicateGroupName(String),
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::DanglingCategoryRef { .. }
            | ValidationIssue::AsymmetricConflict { .. }
            | ValidationIssue::UndeclaredCategory(_) => Severity::Warning,
            ValidationIssue::ContradictoryRelation { .. }
            | ValidationIssue::UnknownGroupItem { .. }
            | ValidationIssue::UndersizedGroup { .. }
            | ValidationIssue::DuplicateGroupName(_) => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Check the category rule entries for internal consistency.
pub fn validate_category_rules(table: &RuleTable) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    for (category, entry) in table.entries() {
        let mut reported = HashSet::new();
        for referenced in entry.referenced() {
            if !table.has_entry(referenced) && reported.insert(referenced) {
                issues.push(ValidationIssue::DanglingCategoryRef {
                    category: category.clone(),
                    referenced: referenced.clone(),
                });
            }
        }

        for other in &entry.conflicts {
            if entry.compatible.contains(other) {
                issues.push(ValidationIssue::ContradictoryRelation {
                    category: category.clone(),
                    other: other.clone(),
                });
            }
            // Dangling targets are already reported above.
            if table.has_entry(other) && !table.rules_for(other).conflicts.contains(category) {
                issues.push(ValidationIssue::AsymmetricConflict {
                    category: category.clone(),
                    other: other.clone(),
                });
            }
        }
    }

    finish(issues)
}

/// Check every conflict group against the catalog.
pub fn validate_groups(table: &RuleTable, catalog: &CatalogIndex) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let mut names = HashSet::new();

    for group in table.groups() {
        if !names.insert(group.name.as_str()) {
            issues.push(ValidationIssue::DuplicateGroupName(group.name.clone()));
        }

        let distinct: HashSet<String> = group.items.iter().filter_map(|i| normalize_id(i)).collect();
        if distinct.len() < MIN_GROUP_SIZE {
            issues.push(ValidationIssue::UndersizedGroup {
                group: group.name.clone(),
                count: distinct.len(),
                min: MIN_GROUP_SIZE,
            });
        }

        for item in &group.items {
            if !catalog.contains(item) {
                issues.push(ValidationIssue::UnknownGroupItem {
                    group: group.name.clone(),
                    item: item.clone(),
                });
            }
        }
    }

    finish(issues)
}

/// Check that every category the catalog uses has a rule entry.
pub fn validate_catalog_coverage(
    table: &RuleTable,
    catalog: &CatalogIndex,
) -> Result<(), Vec<ValidationIssue>> {
    let issues = catalog
        .categories()
        .filter(|c| !table.has_entry(c))
        .map(|c| ValidationIssue::UndeclaredCategory(c.clone()))
        .collect();
    finish(issues)
}

/// Run every check. Never panics; issues are logged and returned.
pub fn validate_all(table: &RuleTable, catalog: &CatalogIndex) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    for result in [
        validate_category_rules(table),
        validate_groups(table, catalog),
        validate_catalog_coverage(table, catalog),
    ] {
        if let Err(found) = result {
            issues.extend(found);
        }
    }

    for issue in &issues {
        let severity = issue.severity();
        log::log!(severity.log_level(), "Rule table {:?}: {}", severity, issue);
    }

    finish(issues)
}

fn finish(issues: Vec<ValidationIssue>) -> Result<(), Vec<ValidationIssue>> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::catalog::{CatalogSource, CategorySection};
    use grimoire_core::item::{ItemDef, Rarity};
    use grimoire_core::rule::{ConflictGroup, RuleEntry};
    use std::collections::BTreeMap;

    fn make_item(id: &str) -> ItemDef {
        ItemDef {
            id: id.into(),
            name: id.into(),
            name_en: None,
            rarity: Rarity::Common,
            description: None,
            level: None,
            materials: None,
            obtain: None,
            trigger: None,
            balance: None,
        }
    }

    fn catalog(sections: &[(&str, &[&str])]) -> CatalogIndex {
        let mut source = CatalogSource::new();
        for (category, ids) in sections {
            source.insert(
                category.to_string(),
                CategorySection {
                    items: ids.iter().map(|id| make_item(id)).collect(),
                    ..Default::default()
                },
            );
        }
        CatalogIndex::build(&[source])
    }

    fn entry(conflicts: &[CategoryId], compatible: &[CategoryId]) -> RuleEntry {
        RuleEntry {
            conflicts: conflicts.to_vec(),
            compatible: compatible.to_vec(),
            weak: vec![],
        }
    }

    fn group(name: &str, items: &[&str]) -> ConflictGroup {
        ConflictGroup {
            name: name.into(),
            items: items.iter().map(|s| s.to_string()).collect(),
            reason: "test".into(),
            description: String::new(),
        }
    }

    fn symmetric_entries() -> BTreeMap<CategoryId, RuleEntry> {
        let mut entries = BTreeMap::new();
        entries.insert(CategoryId::Combat, entry(&[CategoryId::Curse], &[CategoryId::Armor]));
        entries.insert(CategoryId::Curse, entry(&[CategoryId::Combat], &[]));
        entries.insert(CategoryId::Armor, entry(&[], &[CategoryId::Combat]));
        entries
    }

    #[test]
    fn test_valid_table_passes() {
        let table = RuleTable::new(symmetric_entries(), vec![group("g", &["a", "b"])]);
        let cat = catalog(&[("combat", &["a", "b"]), ("curse", &["c"])]);
        assert!(validate_all(&table, &cat).is_ok());
    }

    #[test]
    fn test_dangling_category_is_warning() {
        let mut entries = symmetric_entries();
        entries.insert(CategoryId::Tool, entry(&[], &[CategoryId::from("armor_enhanced")]));
        let table = RuleTable::new(entries, vec![]);
        let issues = validate_category_rules(&table).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ValidationIssue::DanglingCategoryRef { referenced, .. } if referenced.as_str() == "armor_enhanced"
        ));
        assert_eq!(issues[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_asymmetric_conflict_is_warning() {
        let mut entries = symmetric_entries();
        entries.insert(CategoryId::Curse, entry(&[], &[]));
        let table = RuleTable::new(entries, vec![]);
        let issues = validate_category_rules(&table).unwrap_err();
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::AsymmetricConflict { category: CategoryId::Combat, other: CategoryId::Curse }
        )));
        assert!(issues.iter().all(|i| !i.is_error()));
    }

    #[test]
    fn test_contradictory_relation_is_error() {
        let mut entries = symmetric_entries();
        entries.insert(
            CategoryId::Curse,
            entry(&[CategoryId::Combat], &[CategoryId::Combat]),
        );
        let table = RuleTable::new(entries, vec![]);
        let issues = validate_category_rules(&table).unwrap_err();
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::ContradictoryRelation { .. }) && i.is_error()));
    }

    #[test]
    fn test_errors_log_above_warnings() {
        assert_eq!(Severity::Error.log_level(), log::Level::Error);
        assert_eq!(Severity::Warning.log_level(), log::Level::Warn);

        let mut entries = symmetric_entries();
        entries.insert(
            CategoryId::Curse,
            entry(&[CategoryId::Combat], &[CategoryId::Combat]),
        );
        let table = RuleTable::new(entries, vec![]);
        let issues = validate_category_rules(&table).unwrap_err();
        let error = issues.iter().find(|i| i.is_error()).expect("an error");
        assert_eq!(error.severity().log_level(), log::Level::Error);
    }

    #[test]
    fn test_unknown_group_item_rejected() {
        let table = RuleTable::new(symmetric_entries(), vec![group("g", &["a", "ghost"])]);
        let cat = catalog(&[("combat", &["a"])]);
        let issues = validate_groups(&table, &cat).unwrap_err();
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::UnknownGroupItem { item, .. } if item == "ghost"
        )));
    }

    #[test]
    fn test_undersized_group_rejected() {
        let table = RuleTable::new(symmetric_entries(), vec![group("solo", &["a", " A "])]);
        let cat = catalog(&[("combat", &["a"])]);
        let issues = validate_groups(&table, &cat).unwrap_err();
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::UndersizedGroup { count: 1, .. }
        )));
    }

    #[test]
    fn test_duplicate_group_name_rejected() {
        let table = RuleTable::new(
            symmetric_entries(),
            vec![group("g", &["a", "b"]), group("g", &["b", "c"])],
        );
        let cat = catalog(&[("combat", &["a", "b", "c"])]);
        let issues = validate_groups(&table, &cat).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::DuplicateGroupName("g".into())]);
    }

    #[test]
    fn test_undeclared_catalog_category_is_warning() {
        let table = RuleTable::new(symmetric_entries(), vec![]);
        let cat = catalog(&[("combat", &["a"]), ("mystery", &["m"])]);
        let issues = validate_catalog_coverage(&table, &cat).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::UndeclaredCategory(CategoryId::from("mystery"))]
        );
        assert_eq!(issues[0].severity(), Severity::Warning);
    }
}
