use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_ICON};

/// Category an item belongs to. Rule entries are declared per category.
///
/// The known categories are enumerated; anything else the data introduces
/// is carried as `Other` and resolves to an empty rule entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryId {
    Combat,
    Armor,
    Tool,
    Defense,
    Cosmetic,
    Special,
    Curse,
    Utility,
    VanillaWeapon,
    VanillaArmor,
    VanillaTool,
    Other(String),
}

/// All enumerated categories, in declaration order.
pub const KNOWN_CATEGORIES: [CategoryId; 11] = [
    CategoryId::Combat,
    CategoryId::Armor,
    CategoryId::Tool,
    CategoryId::Defense,
    CategoryId::Cosmetic,
    CategoryId::Special,
    CategoryId::Curse,
    CategoryId::Utility,
    CategoryId::VanillaWeapon,
    CategoryId::VanillaArmor,
    CategoryId::VanillaTool,
];

impl CategoryId {
    /// Stable string form used in data files and reports.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryId::Combat => "combat",
            CategoryId::Armor => "armor",
            CategoryId::Tool => "tool",
            CategoryId::Defense => "defense",
            CategoryId::Cosmetic => "cosmetic",
            CategoryId::Special => "special",
            CategoryId::Curse => "curse",
            CategoryId::Utility => "utility",
            CategoryId::VanillaWeapon => "vanilla_weapon",
            CategoryId::VanillaArmor => "vanilla_armor",
            CategoryId::VanillaTool => "vanilla_tool",
            CategoryId::Other(id) => id,
        }
    }

    /// Whether this is one of the enumerated categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, CategoryId::Other(_))
    }
}

impl From<&str> for CategoryId {
    fn from(raw: &str) -> Self {
        let id = raw.trim().to_ascii_lowercase();
        KNOWN_CATEGORIES
            .iter()
            .find(|c| c.as_str() == id)
            .cloned()
            .unwrap_or(CategoryId::Other(id))
    }
}

impl From<String> for CategoryId {
    fn from(raw: String) -> Self {
        CategoryId::from(raw.as_str())
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation metadata for a category, supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: CategoryId,
    pub display_name: String,
    pub icon: String,
    pub color: String,
}

impl CategoryInfo {
    /// Metadata for a category the catalog never described.
    pub fn unknown(id: CategoryId) -> Self {
        Self {
            display_name: id.as_str().to_string(),
            id,
            icon: UNKNOWN_CATEGORY_ICON.to_string(),
            color: UNKNOWN_CATEGORY_COLOR.to_string(),
        }
    }
}
