mod consistency;
pub mod defaults;
pub mod loader;
pub mod table;
pub mod validator;

pub use loader::LoadError;
pub use table::RuleTable;
pub use validator::{Severity, ValidationIssue};
