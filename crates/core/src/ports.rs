//! Port interfaces for the service under test
//!
//! The checks only see this trait. `usercheck-infra` implements it over
//! HTTP; tests implement it in memory.

use async_trait::async_trait;
use usercheck_domain::{Observation, Result};

/// The three read endpoints of the users service.
///
/// Implementations report what the service answered, whatever the status.
/// An `Err` means no response was obtained at all (connection refused,
/// timeout, unreadable body).
#[async_trait]
pub trait UsersService: Send + Sync {
    /// `GET /users/health`
    async fn health(&self) -> Result<Observation>;

    /// `GET /users`
    async fn list_users(&self) -> Result<Observation>;

    /// `GET /users/{id}`
    async fn get_user(&self, id: &str) -> Result<Observation>;
}
