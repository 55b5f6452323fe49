use serde::{Deserialize, Serialize};

use crate::category::CategoryId;
use crate::constants::PLACEHOLDER_DESCRIPTION;

/// Rarity tier of an item. Ordered common < ... < legendary; `Curse` sorts
/// last but is a separate axis rather than a stronger tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Epic,
    Legendary,
    Curse,
}

impl Rarity {
    /// Position on the rarity ladder. Curses have no position.
    pub fn tier(self) -> Option<u8> {
        match self {
            Rarity::Common => Some(0),
            Rarity::Uncommon => Some(1),
            Rarity::Rare => Some(2),
            Rarity::VeryRare => Some(3),
            Rarity::Epic => Some(4),
            Rarity::Legendary => Some(5),
            Rarity::Curse => None,
        }
    }

    /// Distance between two rarities, used to rank substitutes.
    /// A curse is closest to another curse and farthest from everything else.
    pub fn distance(self, other: Rarity) -> u8 {
        match (self.tier(), other.tier()) {
            (Some(a), Some(b)) => a.abs_diff(b),
            (None, None) => 0,
            _ => u8::MAX,
        }
    }
}

/// A single item record as it appears inside a catalog section.
/// Optional presentation fields default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    /// Unique item id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Localized (English) display name.
    #[serde(default)]
    pub name_en: Option<String>,
    pub rarity: Rarity,
    #[serde(default)]
    pub description: Option<String>,
    /// Level range label, e.g. "I-IV".
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub materials: Option<String>,
    #[serde(default)]
    pub obtain: Option<String>,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
}

/// An indexed item: its definition resolved against the category it was
/// declared under. Immutable once the catalog index is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub name_en: Option<String>,
    pub category: CategoryId,
    pub rarity: Rarity,
    /// Never empty: a missing description is replaced by a placeholder.
    pub description: String,
    pub level: Option<String>,
    pub materials: Option<String>,
    pub obtain: Option<String>,
    pub trigger: Option<String>,
    pub balance: Option<String>,
}

impl Item {
    /// Resolve a definition under `category`. Returns None if the id
    /// normalizes to nothing.
    pub fn from_def(def: ItemDef, category: CategoryId) -> Option<Self> {
        let id = normalize_id(&def.id)?;
        let description = def
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string());
        Some(Self {
            id,
            name: def.name,
            name_en: def.name_en,
            category,
            rarity: def.rarity,
            description,
            level: def.level,
            materials: def.materials,
            obtain: def.obtain,
            trigger: def.trigger,
            balance: def.balance,
        })
    }

    /// Display name, preferring the localized variant when asked for it.
    pub fn display_name(&self, localized: bool) -> &str {
        match (&self.name_en, localized) {
            (Some(en), true) => en,
            _ => &self.name,
        }
    }
}

/// Canonical form of an item id: trimmed and ASCII-lowercased.
/// Returns None for ids that are empty after trimming.
pub fn normalize_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_lowercase())
    }
}
