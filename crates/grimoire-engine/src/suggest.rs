use std::collections::BTreeSet;

use grimoire_core::item::Item;

use crate::engine::ConflictEngine;

impl ConflictEngine {
    /// Alternatives for `id`: same-category items that are not in a group
    /// with `id` and do not conflict with any of its group counterparts.
    ///
    /// Category-level conflicts are shared by every same-category peer, so
    /// only group counterparts are used as the filter. Items without group
    /// conflicts get no suggestions. Ranked by rarity distance, then id.
    pub fn get_suggestions(&self, id: &str) -> Vec<String> {
        let Some(item) = self.catalog().lookup(id) else {
            return Vec::new();
        };
        let groups = self.rules().groups_containing(&item.id);

        let counterparts: BTreeSet<&str> = groups
            .iter()
            .flat_map(|g| g.items.iter())
            .filter_map(|m| self.catalog().lookup(m))
            .map(|m| m.id.as_str())
            .filter(|m| *m != item.id)
            .collect();
        if counterparts.is_empty() {
            return Vec::new();
        }

        let candidates: BTreeSet<&str> = self
            .catalog()
            .items_in(&item.category)
            .iter()
            .map(String::as_str)
            .collect();

        let mut ranked: Vec<&Item> = candidates
            .into_iter()
            .filter(|c| *c != item.id && !counterparts.contains(c))
            .filter(|c| counterparts.iter().all(|other| self.evaluate(c, other).is_none()))
            .filter_map(|c| self.catalog().lookup(c))
            .collect();
        ranked.sort_by(|x, y| {
            item.rarity
                .distance(x.rarity)
                .cmp(&item.rarity.distance(y.rarity))
                .then_with(|| x.id.cmp(&y.id))
        });
        ranked.into_iter().map(|c| c.id.clone()).collect()
    }
}
