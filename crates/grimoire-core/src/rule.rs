use serde::{Deserialize, Serialize};

use crate::category::CategoryId;

/// Per-category declaration of how it relates to other categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Categories whose items conflict with items of this category.
    #[serde(default)]
    pub conflicts: Vec<CategoryId>,
    /// Categories explicitly declared compatible.
    #[serde(default)]
    pub compatible: Vec<CategoryId>,
    /// Categories with a weak (informational) relationship.
    #[serde(default)]
    pub weak: Vec<CategoryId>,
}

impl RuleEntry {
    /// Whether this entry declares no relationships at all.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.compatible.is_empty() && self.weak.is_empty()
    }

    /// Every category id referenced by this entry.
    pub fn referenced(&self) -> impl Iterator<Item = &CategoryId> {
        self.conflicts
            .iter()
            .chain(self.compatible.iter())
            .chain(self.weak.iter())
    }
}

/// A named set of items that conflict with each other regardless of their
/// categories' rule entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictGroup {
    /// Group name, unique within a rule table.
    pub name: String,
    /// Covered item ids, in declaration order.
    pub items: Vec<String>,
    /// Short machine-stable reason shown with every conflict from this group.
    pub reason: String,
    /// Longer human description.
    #[serde(default)]
    pub description: String,
}

impl ConflictGroup {
    /// Whether the group covers `id` (ids are compared in normalized form).
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.trim().eq_ignore_ascii_case(id))
    }
}

/// Declared relationship between two categories, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Conflicts,
    Weak,
    Compatible,
    /// Nothing declared on either side.
    Neutral,
}
