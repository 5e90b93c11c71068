//! Suite report

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::checks::{CheckId, CheckOutcome, CheckStatus};

/// Ordered outcomes of one suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub host: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub outcomes: Vec<CheckOutcome>,
}

impl SuiteReport {
    pub fn passed_count(&self) -> usize {
        self.count(|status| matches!(status, CheckStatus::Passed))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|status| matches!(status, CheckStatus::Failed { .. }))
    }

    pub fn errored_count(&self) -> usize {
        self.count(|status| matches!(status, CheckStatus::Errored { .. }))
    }

    /// True when every executed check passed.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn outcome(&self, check: CheckId) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.check == check)
    }

    fn count(&self, predicate: impl Fn(&CheckStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|outcome| predicate(&outcome.status)).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "users conformance against {}", self.host)?;
        for outcome in &self.outcomes {
            let (label, detail) = match &outcome.status {
                CheckStatus::Passed => ("PASS", None),
                CheckStatus::Failed { mismatch } => ("FAIL", Some(mismatch.to_string())),
                CheckStatus::Errored { message } => ("ERROR", Some(message.clone())),
            };
            let check = outcome.check.as_str();
            writeln!(f, "  {label:<5} {check:<28} {:>6} ms", outcome.elapsed_ms)?;
            if let Some(detail) = detail {
                writeln!(f, "        {detail}")?;
            }
        }
        write!(
            f,
            "{} passed, {} failed, {} errored in {} ms",
            self.passed_count(),
            self.failed_count(),
            self.errored_count(),
            self.elapsed_ms
        )
    }
}
