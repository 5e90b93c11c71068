//! Captured HTTP response

use serde::{Deserialize, Serialize};

/// What the suite observed for a single request.
///
/// Adapters fill this in without interpreting it; every assertion happens
/// in the checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub status: u16,
    /// Raw `Content-Type` header value, if the response carried one
    pub content_type: Option<String>,
    pub body: String,
}

impl Observation {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
        Self { status, content_type, body: body.into() }
    }

    /// Observation of a JSON response with the given status and body.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Some("application/json".to_string()), body)
    }
}
