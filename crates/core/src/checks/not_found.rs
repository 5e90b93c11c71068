//! Error-path checks
//!
//! A malformed id and a well-formed but unknown id both collapse to 404.

use usercheck_domain::constants::{ABSENT_USER_ID, INVALID_USER_ID};

use super::{expect, CheckResult};
use crate::ports::UsersService;

/// `GET /users/invalid-id` must answer 404.
pub async fn get_invalid_id(service: &dyn UsersService) -> CheckResult {
    expect_not_found(service, INVALID_USER_ID).await
}

/// `GET /users/{absent uuid}` must answer 404.
pub async fn get_absent_id(service: &dyn UsersService) -> CheckResult {
    expect_not_found(service, ABSENT_USER_ID).await
}

async fn expect_not_found(service: &dyn UsersService, id: &str) -> CheckResult {
    let observation = service.get_user(id).await?;
    expect::status(&format!("GET /users/{id}"), &observation, 404)?;
    Ok(())
}
