use grimoire_core::category::{CategoryId, CategoryInfo};
use serde::{Deserialize, Serialize};

/// What produced a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictSource {
    /// Both items belong to the named conflict group.
    Group { name: String },
    /// A category rule entry lists the other item's category.
    Category { declared_by: CategoryId },
}

/// Outcome of a pairwise evaluation.
///
/// The pair is stored in canonical (sorted) order, so evaluating `(a, b)`
/// and `(b, a)` yields equal results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub item_a: String,
    pub item_b: String,
    pub has_conflict: bool,
    pub source: ConflictSource,
    pub reason: String,
    pub description: String,
    /// Category metadata used to present the conflict.
    pub category: CategoryInfo,
}

impl ConflictResult {
    /// A positive result for the unordered pair `{a, b}`.
    pub fn conflict(
        a: &str,
        b: &str,
        source: ConflictSource,
        reason: impl Into<String>,
        description: impl Into<String>,
        category: CategoryInfo,
    ) -> Self {
        let (item_a, item_b) = if a <= b { (a, b) } else { (b, a) };
        Self {
            item_a: item_a.to_string(),
            item_b: item_b.to_string(),
            has_conflict: true,
            source,
            reason: reason.into(),
            description: description.into(),
            category,
        }
    }

    /// The pair in canonical order.
    pub fn pair(&self) -> (&str, &str) {
        (&self.item_a, &self.item_b)
    }

    /// Whether `id` is one side of the pair.
    pub fn involves(&self, id: &str) -> bool {
        self.item_a == id || self.item_b == id
    }

    /// The side of the pair that is not `id`.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.item_a == id {
            Some(&self.item_b)
        } else if self.item_b == id {
            Some(&self.item_a)
        } else {
            None
        }
    }

    pub fn is_group_conflict(&self) -> bool {
        matches!(self.source, ConflictSource::Group { .. })
    }
}
