use std::collections::{BTreeMap, HashMap};

use grimoire_core::category::CategoryId;
use grimoire_core::item::normalize_id;
use grimoire_core::rule::{ConflictGroup, Relation, RuleEntry};

static EMPTY_ENTRY: RuleEntry = RuleEntry {
    conflicts: Vec::new(),
    compatible: Vec::new(),
    weak: Vec::new(),
};

/// Static rule table: per-category rule entries plus item-level conflict
/// groups. Built once and never mutated, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    entries: BTreeMap<CategoryId, RuleEntry>,
    groups: Vec<ConflictGroup>,
    /// Normalized item id -> indices into `groups`, in declaration order.
    membership: HashMap<String, Vec<usize>>,
}

impl RuleTable {
    pub fn new(entries: BTreeMap<CategoryId, RuleEntry>, groups: Vec<ConflictGroup>) -> Self {
        let mut membership: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for raw in &group.items {
                let Some(id) = normalize_id(raw) else {
                    continue;
                };
                let slots = membership.entry(id).or_default();
                // An id listed twice in one group still counts once.
                if slots.last() != Some(&idx) {
                    slots.push(idx);
                }
            }
        }
        Self {
            entries,
            groups,
            membership,
        }
    }

    /// Rule entry for a category. Categories without a declared entry are
    /// neutral: they resolve to the empty entry instead of failing.
    pub fn rules_for(&self, category: &CategoryId) -> &RuleEntry {
        match self.entries.get(category) {
            Some(entry) => entry,
            None => &EMPTY_ENTRY,
        }
    }

    /// Whether the category has a declared entry.
    pub fn has_entry(&self, category: &CategoryId) -> bool {
        self.entries.contains_key(category)
    }

    /// All declared entries, in category order.
    pub fn entries(&self) -> impl Iterator<Item = (&CategoryId, &RuleEntry)> {
        self.entries.iter()
    }

    /// All groups, in declaration order.
    pub fn groups(&self) -> &[ConflictGroup] {
        &self.groups
    }

    /// Groups that cover `item_id`, in declaration order.
    pub fn groups_containing(&self, item_id: &str) -> Vec<&ConflictGroup> {
        let Some(id) = normalize_id(item_id) else {
            return Vec::new();
        };
        self.membership
            .get(&id)
            .map(|slots| slots.iter().map(|&i| &self.groups[i]).collect())
            .unwrap_or_default()
    }

    /// First group (declaration order) covering both ids, if any.
    /// Independent of argument order.
    pub fn shared_group(&self, a: &str, b: &str) -> Option<&ConflictGroup> {
        let a = normalize_id(a)?;
        let b = normalize_id(b)?;
        let in_a = self.membership.get(&a)?;
        let in_b = self.membership.get(&b)?;
        // Both lists are sorted ascending, so the first common index is the
        // earliest declared shared group.
        let (mut i, mut j) = (0, 0);
        while i < in_a.len() && j < in_b.len() {
            match in_a[i].cmp(&in_b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return Some(&self.groups[in_a[i]]),
            }
        }
        None
    }

    /// Categories whose own entry declares a conflict between `a` and `b`.
    /// Empty when neither side declares one.
    pub fn conflict_declarers(&self, a: &CategoryId, b: &CategoryId) -> Vec<&CategoryId> {
        let mut declarers = Vec::new();
        if let Some((key, entry)) = self.entries.get_key_value(a) {
            if entry.conflicts.contains(b) {
                declarers.push(key);
            }
        }
        if a != b {
            if let Some((key, entry)) = self.entries.get_key_value(b) {
                if entry.conflicts.contains(a) {
                    declarers.push(key);
                }
            }
        }
        declarers
    }

    /// Whether categories `a` and `b` conflict, declared from either side.
    pub fn categories_conflict(&self, a: &CategoryId, b: &CategoryId) -> bool {
        !self.conflict_declarers(a, b).is_empty()
    }

    /// Strongest relationship either side declares.
    pub fn relation(&self, a: &CategoryId, b: &CategoryId) -> Relation {
        let ea = self.rules_for(a);
        let eb = self.rules_for(b);
        if ea.conflicts.contains(b) || eb.conflicts.contains(a) {
            Relation::Conflicts
        } else if ea.weak.contains(b) || eb.weak.contains(a) {
            Relation::Weak
        } else if ea.compatible.contains(b) || eb.compatible.contains(a) {
            Relation::Compatible
        } else {
            Relation::Neutral
        }
    }

    /// Every category that conflicts with `category`, from either side,
    /// in category order without duplicates.
    pub fn conflicting_categories(&self, category: &CategoryId) -> Vec<CategoryId> {
        let mut out: Vec<CategoryId> = self.rules_for(category).conflicts.clone();
        for (other, entry) in &self.entries {
            if entry.conflicts.contains(category) {
                out.push(other.clone());
            }
        }
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, items: &[&str], reason: &str) -> ConflictGroup {
        ConflictGroup {
            name: name.into(),
            items: items.iter().map(|s| s.to_string()).collect(),
            reason: reason.into(),
            description: String::new(),
        }
    }

    fn sample_table() -> RuleTable {
        let mut entries = BTreeMap::new();
        entries.insert(
            CategoryId::Special,
            RuleEntry {
                conflicts: vec![CategoryId::Defense],
                compatible: vec![CategoryId::Cosmetic],
                weak: vec![CategoryId::Tool],
            },
        );
        // Asymmetric on purpose: defense does not list special back.
        entries.insert(
            CategoryId::Defense,
            RuleEntry {
                conflicts: vec![],
                compatible: vec![CategoryId::Combat],
                weak: vec![],
            },
        );
        RuleTable::new(
            entries,
            vec![
                group("crit-family", &["critical_strike", "precision_strike", "execution"], "暴击效果"),
                group("finishers", &["execution", "critical_strike"], "终结"),
                group("lifesteal", &["vampirism", "life_drain"], "生命偷取"),
            ],
        )
    }

    #[test]
    fn test_unknown_category_is_empty_entry() {
        let table = sample_table();
        let entry = table.rules_for(&CategoryId::from("armor_enhanced"));
        assert!(entry.is_empty());
        assert!(!table.has_entry(&CategoryId::Curse));
    }

    #[test]
    fn test_groups_containing_in_declaration_order() {
        let table = sample_table();
        let names: Vec<&str> = table
            .groups_containing("execution")
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, ["crit-family", "finishers"]);
        assert!(table.groups_containing("unknown").is_empty());
        assert!(table.groups_containing("").is_empty());
    }

    #[test]
    fn test_shared_group_is_first_declared_and_symmetric() {
        let table = sample_table();
        let g = table
            .shared_group("execution", "critical_strike")
            .expect("shared");
        assert_eq!(g.name, "crit-family");
        let g2 = table
            .shared_group("critical_strike", "execution")
            .expect("shared");
        assert_eq!(g2.name, "crit-family");
        assert!(table.shared_group("critical_strike", "vampirism").is_none());
    }

    #[test]
    fn test_category_conflict_read_from_either_side() {
        let table = sample_table();
        assert!(table.categories_conflict(&CategoryId::Special, &CategoryId::Defense));
        assert!(table.categories_conflict(&CategoryId::Defense, &CategoryId::Special));
        assert_eq!(
            table.conflict_declarers(&CategoryId::Defense, &CategoryId::Special),
            vec![&CategoryId::Special]
        );
        assert!(!table.categories_conflict(&CategoryId::Special, &CategoryId::Special));
    }

    #[test]
    fn test_relation_strength() {
        let table = sample_table();
        assert_eq!(
            table.relation(&CategoryId::Defense, &CategoryId::Special),
            Relation::Conflicts
        );
        assert_eq!(
            table.relation(&CategoryId::Tool, &CategoryId::Special),
            Relation::Weak
        );
        assert_eq!(
            table.relation(&CategoryId::Cosmetic, &CategoryId::Special),
            Relation::Compatible
        );
        assert_eq!(
            table.relation(&CategoryId::Curse, &CategoryId::Utility),
            Relation::Neutral
        );
    }

    #[test]
    fn test_conflicting_categories_includes_reverse_declarations() {
        let table = sample_table();
        assert_eq!(
            table.conflicting_categories(&CategoryId::Defense),
            vec![CategoryId::Special]
        );
        assert_eq!(
            table.conflicting_categories(&CategoryId::Special),
            vec![CategoryId::Defense]
        );
    }

    #[test]
    fn test_duplicate_member_counted_once() {
        let table = RuleTable::new(
            BTreeMap::new(),
            vec![group("dup", &["a", "A ", "b"], "r")],
        );
        assert_eq!(table.groups_containing("a").len(), 1);
        assert!(table.shared_group("a", "b").is_some());
    }
}
