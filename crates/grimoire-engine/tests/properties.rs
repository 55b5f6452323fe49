//! Property-based tests for conflict evaluation over the bundled catalog.
//!
//! - Symmetry: check(a, b) == check(b, a)
//! - Reflexivity: check(a, a) is absent
//! - Order independence of the multi-check
//! - can_coexist agrees with the multi-check

use std::sync::OnceLock;

use grimoire_engine::{ConflictEngine, EngineConfig};
use proptest::prelude::*;

fn shared_engine() -> &'static ConflictEngine {
    static ENGINE: OnceLock<ConflictEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let config = EngineConfig {
            record_history: false,
            ..Default::default()
        };
        ConflictEngine::with_defaults(config).expect("bundled data should load")
    })
}

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

/// A catalog id, occasionally mangled in case or padding, or an unknown id.
fn id_strategy() -> impl Strategy<Value = String> {
    let ids: Vec<String> = shared_engine()
        .catalog()
        .items()
        .map(|i| i.id.clone())
        .collect();
    prop_oneof![
        8 => prop::sample::select(ids.clone()),
        1 => prop::sample::select(ids).prop_map(|id| format!("  {}", id.to_ascii_uppercase())),
        1 => prop::string::string_regex("[a-z_]{0,12}").expect("valid regex"),
    ]
}

fn id_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(id_strategy(), 0..8)
}

proptest! {
    #[test]
    fn check_is_symmetric(a in id_strategy(), b in id_strategy()) {
        let engine = shared_engine();
        prop_assert_eq!(engine.check_conflict(&a, &b), engine.check_conflict(&b, &a));
    }

    #[test]
    fn check_is_irreflexive(a in id_strategy()) {
        let engine = shared_engine();
        prop_assert!(engine.check_conflict(&a, &a).is_none());
        prop_assert!(engine.check_conflict(&a, &a.to_ascii_uppercase()).is_none());
        prop_assert!(engine.check_conflict("", &a).is_none());
    }

    #[test]
    fn multi_check_is_order_independent(ids in id_list_strategy()) {
        let engine = shared_engine();
        let forward = engine.check_multiple_conflicts(&ids);
        let mut reversed = ids.clone();
        reversed.reverse();
        prop_assert_eq!(&forward, &engine.check_multiple_conflicts(&reversed));
        let mut rotated = ids.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(1);
        }
        prop_assert_eq!(&forward, &engine.check_multiple_conflicts(&rotated));
    }

    #[test]
    fn coexistence_matches_multi_check(ids in id_list_strategy()) {
        let engine = shared_engine();
        prop_assert_eq!(
            engine.can_coexist(&ids),
            engine.check_multiple_conflicts(&ids).is_empty()
        );
    }

    #[test]
    fn binder_level_is_minimal(ids in id_list_strategy()) {
        let engine = shared_engine();
        match engine.min_binder_level(&ids) {
            Some(level) => {
                prop_assert!(engine.can_combine_with_binder(&ids, level));
                if level > 0 {
                    prop_assert!(!engine.can_combine_with_binder(&ids, level - 1));
                }
            }
            None => {
                let max = engine.config().max_binder_level;
                prop_assert!(!engine.can_combine_with_binder(&ids, max));
            }
        }
    }
}
