use std::collections::BTreeMap;

use grimoire_core::catalog::CatalogSource;
use grimoire_core::category::CategoryId;
use grimoire_core::rule::{ConflictGroup, RuleEntry};
use thiserror::Error;

use crate::table::RuleTable;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse catalog RON: {0}")]
    CatalogParseError(String),
    #[error("Failed to parse catalog JSON: {0}")]
    JsonCatalogParseError(String),
    #[error("Failed to parse category rules RON: {0}")]
    CategoryRulesParseError(String),
    #[error("Failed to parse conflict groups RON: {0}")]
    GroupsParseError(String),
}

/// Parse a single catalog RON string.
pub fn load_catalog_from_str(ron_str: &str) -> Result<CatalogSource, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::CatalogParseError(e.to_string()))
}

/// Parse a catalog exported in the external JSON shape.
pub fn load_catalog_from_json(json_str: &str) -> Result<CatalogSource, LoadError> {
    serde_json::from_str(json_str).map_err(|e| LoadError::JsonCatalogParseError(e.to_string()))
}

/// Parse several catalog RON sources, preserving their order.
pub fn load_all_catalogs(sources: &[&str]) -> Result<Vec<CatalogSource>, LoadError> {
    sources.iter().map(|s| load_catalog_from_str(s)).collect()
}

/// Parse the category rule map.
pub fn load_category_rules_from_str(
    ron_str: &str,
) -> Result<BTreeMap<CategoryId, RuleEntry>, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::CategoryRulesParseError(e.to_string()))
}

/// Parse a list of conflict groups.
pub fn load_groups_from_str(ron_str: &str) -> Result<Vec<ConflictGroup>, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::GroupsParseError(e.to_string()))
}

/// Load the category rules and merge every group source into one table.
pub fn load_rule_table(categories: &str, group_sources: &[&str]) -> Result<RuleTable, LoadError> {
    let entries = load_category_rules_from_str(categories)?;
    let mut groups = Vec::new();
    for source in group_sources {
        groups.extend(load_groups_from_str(source)?);
    }
    Ok(RuleTable::new(entries, groups))
}
