//! Assertion failure taxonomy

use serde::Serialize;
use thiserror::Error;

/// One failed assertion against the service.
///
/// `request` names the request that produced the offending response, e.g.
/// `GET /users/health`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    #[error("{request}: expected status {expected}, got {actual}")]
    Status { request: String, expected: u16, actual: u16 },

    #[error(
        "{request}: expected content type {expected}, got {}",
        .actual.as_deref().unwrap_or("<none>")
    )]
    ContentType { request: String, expected: String, actual: Option<String> },

    #[error("{request}: {detail}")]
    Body { request: String, detail: String },

    #[error("{request}: expected {expected} records, got {actual}")]
    Cardinality { request: String, expected: usize, actual: usize },
}

impl Mismatch {
    pub fn body(request: &str, detail: impl Into<String>) -> Self {
        Self::Body { request: request.to_string(), detail: detail.into() }
    }

    /// Short category name used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::ContentType { .. } => "content_type",
            Self::Body { .. } => "body",
            Self::Cardinality { .. } => "cardinality",
        }
    }
}
