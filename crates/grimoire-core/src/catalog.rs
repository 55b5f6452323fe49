use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryId, CategoryInfo};
use crate::item::{normalize_id, Item, ItemDef};

/// One category's block in a catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySection {
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

/// External catalog shape: category id -> section.
pub type CatalogSource = BTreeMap<String, CategorySection>;

/// Read-only item index built once from one or more catalog sources.
///
/// Catalog integrity is not assumed: a duplicate id keeps the last record
/// seen, and items whose id is blank are skipped.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    items: BTreeMap<String, Item>,
    categories: BTreeMap<CategoryId, CategoryInfo>,
    by_category: BTreeMap<CategoryId, Vec<String>>,
}

impl CatalogIndex {
    /// Build the index from sources, later sources overriding earlier ones.
    pub fn build(sources: &[CatalogSource]) -> Self {
        let mut items: BTreeMap<String, Item> = BTreeMap::new();
        let mut categories = BTreeMap::new();

        for source in sources {
            for (raw_category, section) in source {
                let category = CategoryId::from(raw_category.as_str());
                let fallback = CategoryInfo::unknown(category.clone());
                categories.insert(
                    category.clone(),
                    CategoryInfo {
                        id: category.clone(),
                        display_name: section.display_name.clone().unwrap_or(fallback.display_name),
                        icon: section.icon.clone().unwrap_or(fallback.icon),
                        color: section.color.clone().unwrap_or(fallback.color),
                    },
                );

                for def in &section.items {
                    let Some(item) = Item::from_def(def.clone(), category.clone()) else {
                        log::debug!("Skipping catalog item with blank id in '{}'", category);
                        continue;
                    };
                    if let Some(previous) = items.insert(item.id.clone(), item) {
                        log::debug!(
                            "Catalog id '{}' redeclared, replacing record from '{}'",
                            previous.id,
                            previous.category
                        );
                    }
                }
            }
        }

        let mut by_category: BTreeMap<CategoryId, Vec<String>> = BTreeMap::new();
        for item in items.values() {
            by_category
                .entry(item.category.clone())
                .or_default()
                .push(item.id.clone());
        }

        Self {
            items,
            categories,
            by_category,
        }
    }

    /// Look up an item by id. Returns None for unknown or blank ids.
    pub fn lookup(&self, id: &str) -> Option<&Item> {
        let id = normalize_id(id)?;
        self.items.get(&id)
    }

    /// Whether the id resolves to an item.
    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// All items in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Ids of the items declared under `category`, in id order.
    pub fn items_in(&self, category: &CategoryId) -> &[String] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Presentation metadata for a category, with a neutral fallback.
    pub fn category_info(&self, category: &CategoryId) -> CategoryInfo {
        self.categories
            .get(category)
            .cloned()
            .unwrap_or_else(|| CategoryInfo::unknown(category.clone()))
    }

    /// Every category the catalog declared a section for.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.keys()
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
