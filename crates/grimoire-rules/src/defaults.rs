//! Bundled catalog and rule data, embedded at compile time.

use grimoire_core::catalog::CatalogIndex;

use crate::loader::{load_all_catalogs, load_rule_table, LoadError};
use crate::table::RuleTable;

/// Catalog sources in load order. Later files override earlier ones on
/// duplicate ids.
pub const CATALOG_SOURCES: [&str; 9] = [
    include_str!("../../../data/catalog/combat.ron"),
    include_str!("../../../data/catalog/armor.ron"),
    include_str!("../../../data/catalog/tool.ron"),
    include_str!("../../../data/catalog/defense.ron"),
    include_str!("../../../data/catalog/cosmetic.ron"),
    include_str!("../../../data/catalog/special.ron"),
    include_str!("../../../data/catalog/curse.ron"),
    include_str!("../../../data/catalog/utility.ron"),
    include_str!("../../../data/catalog/vanilla.ron"),
];

/// Category rule entries.
pub const CATEGORY_RULES: &str = include_str!("../../../data/rules/categories.ron");

/// Conflict group sources, in declaration order.
pub const GROUP_SOURCES: [&str; 2] = [
    include_str!("../../../data/rules/groups.ron"),
    include_str!("../../../data/rules/vanilla_groups.ron"),
];

/// Build the catalog index from the bundled data.
pub fn default_catalog() -> Result<CatalogIndex, LoadError> {
    let sources = load_all_catalogs(&CATALOG_SOURCES)?;
    Ok(CatalogIndex::build(&sources))
}

/// Build the rule table from the bundled data.
pub fn default_rule_table() -> Result<RuleTable, LoadError> {
    load_rule_table(CATEGORY_RULES, &GROUP_SOURCES)
}
