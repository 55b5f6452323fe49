//! Shared data model for the enchantment conflict engine: item records,
//! categories, the catalog index and the declarative rule types.

pub mod catalog;
pub mod category;
pub mod constants;
pub mod item;
pub mod rule;

pub use catalog::{CatalogIndex, CatalogSource, CategorySection};
pub use category::{CategoryId, CategoryInfo};
pub use item::{normalize_id, Item, ItemDef, Rarity};
pub use rule::{ConflictGroup, Relation, RuleEntry};
