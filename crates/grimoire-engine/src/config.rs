use grimoire_core::constants::DEFAULT_MAX_HISTORY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse engine config RON: {0}")]
    ParseError(String),
}

/// Runtime knobs for a conflict engine. Every field is optional in RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of history entries kept; oldest are evicted first.
    pub max_history: usize,
    /// Whether `check_conflict` appends positive results to the history.
    pub record_history: bool,
    /// Conflicting pairs tolerated per binder level.
    pub binder_conflicts_per_level: usize,
    /// Highest binder level; requested levels are clamped to it.
    pub max_binder_level: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            record_history: true,
            binder_conflicts_per_level: 3,
            max_binder_level: 3,
        }
    }
}

impl EngineConfig {
    /// Parse a config from RON. Missing fields take their defaults.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
