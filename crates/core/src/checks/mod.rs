//! Conformance checks
//!
//! Each check is a single independent request/response/assert sequence that
//! stops at the first [`Mismatch`]. Transport failures surface as
//! [`CheckFailure::Service`] so they are never confused with a wrong answer.

pub mod expect;
pub mod health;
pub mod listing;
pub mod lookup;
mod mismatch;
pub mod not_found;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use usercheck_domain::UsercheckError;

pub use mismatch::Mismatch;

/// Why a check did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    /// The service answered, but not as the contract requires
    #[error(transparent)]
    Mismatch(#[from] Mismatch),

    /// The service could not be reached or read
    #[error(transparent)]
    Service(#[from] UsercheckError),
}

/// Result of running one check.
pub type CheckResult = Result<(), CheckFailure>;

/// Identifier of every check, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    Health,
    ListUsers,
    GetSampledUsers,
    GetKnownUser,
    GetInvalidId,
    GetAbsentId,
    RepeatedGetIsIdempotent,
    GetEveryUser,
}

impl CheckId {
    /// All checks in the order the suite runs them.
    pub const ALL: [Self; 8] = [
        Self::Health,
        Self::ListUsers,
        Self::GetSampledUsers,
        Self::GetKnownUser,
        Self::GetInvalidId,
        Self::GetAbsentId,
        Self::RepeatedGetIsIdempotent,
        Self::GetEveryUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::ListUsers => "list_users",
            Self::GetSampledUsers => "get_sampled_users",
            Self::GetKnownUser => "get_known_user",
            Self::GetInvalidId => "get_invalid_id",
            Self::GetAbsentId => "get_absent_id",
            Self::RepeatedGetIsIdempotent => "repeated_get_is_idempotent",
            Self::GetEveryUser => "get_every_user",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Health => "GET /users/health answers 200",
            Self::ListUsers => "GET /users returns exactly the fixture set",
            Self::GetSampledUsers => "GET /users/{id} returns the record for a random sample",
            Self::GetKnownUser => "GET /users/{id} returns the pinned record with 3 keys",
            Self::GetInvalidId => "GET /users/invalid-id answers 404",
            Self::GetAbsentId => "GET /users/{absent uuid} answers 404",
            Self::RepeatedGetIsIdempotent => "repeated GET /users/{id} returns identical bodies",
            Self::GetEveryUser => "GET /users/{id} returns the record for every fixture entry",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckId {
    type Err = UsercheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|check| check.as_str() == s)
            .ok_or_else(|| UsercheckError::InvalidInput(format!("Unknown check: {s}")))
    }
}

/// How a check ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed { mismatch: Mismatch },
    Errored { message: String },
}

impl From<CheckResult> for CheckStatus {
    fn from(result: CheckResult) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(CheckFailure::Mismatch(mismatch)) => Self::Failed { mismatch },
            Err(CheckFailure::Service(err)) => Self::Errored { message: err.to_string() },
        }
    }
}

/// Outcome of one check within a suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub check: CheckId,
    pub status: CheckStatus,
    pub elapsed_ms: u64,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.status, CheckStatus::Passed)
    }

    /// The mismatch, if the check failed on an assertion.
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match &self.status {
            CheckStatus::Failed { mismatch } => Some(mismatch),
            _ => None,
        }
    }
}
