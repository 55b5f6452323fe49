//! Single source of truth for shared constants.

/// Default bound on the conflict history ledger.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Reason code attached to conflicts produced by category rules.
pub const CATEGORY_CONFLICT_REASON: &str = "category_conflict";

/// Shown in place of a missing item description.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available.";

/// Icon used for categories with no catalog metadata.
pub const UNKNOWN_CATEGORY_ICON: &str = "?";

/// Neutral grey used for categories with no catalog metadata.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#95a5a6";

/// Smallest number of distinct items a conflict group must cover.
pub const MIN_GROUP_SIZE: usize = 2;
