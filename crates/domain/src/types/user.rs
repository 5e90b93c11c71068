//! User record
//!
//! The shape served by `GET /users` (as array elements) and
//! `GET /users/{id}`.

use serde::{Deserialize, Serialize};

/// A single user record.
///
/// Records are immutable once the fixture is loaded. The JSON form carries
/// exactly the three keys below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    /// UUID-shaped identifier
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), email: email.into() }
    }

    /// JSON object form used for exact comparison against response bodies.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
        })
    }
}
