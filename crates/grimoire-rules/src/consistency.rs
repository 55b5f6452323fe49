//! Consistency tests for the bundled catalog and rule data.
//! These load every production data file and check the rule graph for
//! problems the per-function validators only catch one table at a time:
//! one-sided category conflicts, groups that collapse to a single known
//! item, and catalog categories nobody wrote rules for.

#[cfg(test)]
mod tests {
    use crate::defaults::{default_catalog, default_rule_table};
    use crate::table::RuleTable;
    use crate::validator;
    use grimoire_core::catalog::CatalogIndex;
    use grimoire_core::item::normalize_id;
    use std::collections::HashSet;

    fn load_all() -> (CatalogIndex, RuleTable) {
        let catalog = default_catalog().expect("bundled catalog should load");
        let table = default_rule_table().expect("bundled rules should load");
        (catalog, table)
    }

    #[test]
    fn test_bundled_data_validates_clean() {
        let (catalog, table) = load_all();
        if let Err(issues) = validator::validate_all(&table, &catalog) {
            let lines: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
            panic!("bundled data has {} issue(s):\n{}", lines.len(), lines.join("\n"));
        }
    }

    /// Every declared category conflict must be declared from both sides.
    #[test]
    fn test_category_conflicts_symmetric() {
        let (_, table) = load_all();
        let mut one_sided = Vec::new();
        for (category, entry) in table.entries() {
            for other in &entry.conflicts {
                if !table.rules_for(other).conflicts.contains(category) {
                    one_sided.push(format!("{category} -> {other}"));
                }
            }
        }
        assert!(one_sided.is_empty(), "one-sided conflicts: {one_sided:?}");
    }

    /// No category conflicts with itself; that would forbid any two items of
    /// the same category from coexisting.
    #[test]
    fn test_no_self_conflicting_category() {
        let (_, table) = load_all();
        for (category, entry) in table.entries() {
            assert!(
                !entry.conflicts.contains(category),
                "category {category} conflicts with itself"
            );
        }
    }

    #[test]
    fn test_every_group_has_two_known_members() {
        let (catalog, table) = load_all();
        for group in table.groups() {
            let known: HashSet<String> = group
                .items
                .iter()
                .filter_map(|i| normalize_id(i))
                .filter(|id| catalog.contains(id))
                .collect();
            assert!(
                known.len() >= 2,
                "group {} has only {} known member(s)",
                group.name,
                known.len()
            );
        }
    }

    #[test]
    fn test_every_catalog_category_has_entry() {
        let (catalog, table) = load_all();
        let missing: Vec<String> = catalog
            .categories()
            .filter(|c| !table.has_entry(c))
            .map(|c| c.to_string())
            .collect();
        assert!(missing.is_empty(), "categories without rules: {missing:?}");
    }

    /// Group members must not already conflict through their categories;
    /// such a group would be redundant and only shadow the category reason.
    #[test]
    fn test_groups_not_shadowed_by_category_conflicts() {
        let (catalog, table) = load_all();
        for group in table.groups() {
            let members: Vec<_> = group.items.iter().filter_map(|i| catalog.lookup(i)).collect();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    assert!(
                        !table.categories_conflict(&a.category, &b.category),
                        "group {} pairs {} and {} whose categories already conflict",
                        group.name,
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_group_names_unique() {
        let (_, table) = load_all();
        let mut seen = HashSet::new();
        for group in table.groups() {
            assert!(seen.insert(group.name.as_str()), "duplicate group {}", group.name);
        }
    }
}
