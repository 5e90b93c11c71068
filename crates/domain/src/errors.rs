//! Error types used throughout the suite

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for usercheck
///
/// These are harness failures (bad configuration, unreachable service,
/// corrupt fixture). Assertion failures against the service are reported as
/// mismatches by `usercheck-core`, never through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum UsercheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for usercheck operations
pub type Result<T> = std::result::Result<T, UsercheckError>;
