use crate::engine::ConflictEngine;
use crate::result::ConflictResult;

/// Accessor for an externally owned set of item ids, such as equipped gear.
/// `None` means the source is currently unavailable.
pub trait ItemSource {
    fn current_items(&self) -> Option<Vec<String>>;
}

impl<F> ItemSource for F
where
    F: Fn() -> Option<Vec<String>>,
{
    fn current_items(&self) -> Option<Vec<String>> {
        self()
    }
}

impl ItemSource for Vec<String> {
    fn current_items(&self) -> Option<Vec<String>> {
        Some(self.clone())
    }
}

/// Pulls a snapshot from its source on every call and hands it to the
/// engine. Holds no rule logic and caches nothing.
pub struct RealtimeDetector<'e, S> {
    engine: &'e ConflictEngine,
    source: S,
}

impl<'e, S: ItemSource> RealtimeDetector<'e, S> {
    pub fn new(engine: &'e ConflictEngine, source: S) -> Self {
        Self { engine, source }
    }

    /// Conflicts among the current items. Empty when the source is absent.
    pub fn detect_inventory_conflicts(&self) -> Vec<ConflictResult> {
        match self.source.current_items() {
            Some(items) => self.engine.check_multiple_conflicts(items.as_slice()),
            None => Vec::new(),
        }
    }

    /// Whether `candidate` could join the current items without adding a
    /// conflict. Existing conflicts among the current items are ignored.
    pub fn can_equip(&self, candidate: &str) -> bool {
        let items = self.source.current_items().unwrap_or_default();
        items
            .iter()
            .all(|held| self.engine.evaluate(candidate, held).is_none())
    }
}
