//! Health endpoint check

use super::{expect, CheckResult};
use crate::ports::UsersService;

pub const REQUEST: &str = "GET /users/health";

/// `GET /users/health` must answer 200. Nothing else is asserted.
pub async fn health(service: &dyn UsersService) -> CheckResult {
    let observation = service.health().await?;
    expect::status(REQUEST, &observation, 200)?;
    Ok(())
}
