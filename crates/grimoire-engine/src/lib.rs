//! Conflict evaluation over a catalog and a static rule table.
//!
//! The engine is an explicitly constructed value: it owns its history
//! ledger and borrows nothing from global state, so tests and hosts can run
//! independent instances side by side.

pub mod combination;
pub mod config;
pub mod engine;
pub mod history;
pub mod realtime;
pub mod report;
pub mod result;
pub mod stats;
mod suggest;

pub use combination::CombinationReport;
pub use config::{ConfigError, EngineConfig};
pub use engine::{ConflictEngine, ConflictEntry};
pub use history::{HistoryEntry, HistoryLedger, HistorySummary};
pub use realtime::{ItemSource, RealtimeDetector};
pub use report::{Report, RuleValidation};
pub use result::{ConflictResult, ConflictSource};
pub use stats::Statistics;
