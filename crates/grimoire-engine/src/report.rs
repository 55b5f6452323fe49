use chrono::{DateTime, Utc};
use grimoire_rules::validator::{self, Severity, ValidationIssue};
use serde::Serialize;

use crate::engine::ConflictEngine;
use crate::stats::Statistics;

/// Outcome of static rule validation. Never fails; `is_valid` is false only
/// when an error-severity issue exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub issues: Vec<ValidationIssue>,
}

impl RuleValidation {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for issue in &issues {
            match issue.severity() {
                Severity::Error => errors.push(issue.to_string()),
                Severity::Warning => warnings.push(issue.to_string()),
            }
        }
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            issues,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub statistics: Statistics,
    pub validation: RuleValidation,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl ConflictEngine {
    pub fn validate_rules(&self) -> RuleValidation {
        match validator::validate_all(self.rules(), self.catalog()) {
            Ok(()) => RuleValidation::from_issues(Vec::new()),
            Err(issues) => RuleValidation::from_issues(issues),
        }
    }

    pub fn generate_report(&self) -> Report {
        let report = Report {
            generated_at: Utc::now(),
            statistics: self.statistics(),
            validation: self.validate_rules(),
        };
        log::info!(
            "Generated report: {} conflicting pairs, {} errors, {} warnings",
            report.statistics.total_conflicts,
            report.validation.errors.len(),
            report.validation.warnings.len()
        );
        report
    }
}
