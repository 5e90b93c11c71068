//! Get-by-id checks

use usercheck_domain::constants::{KNOWN_USER_EMAIL, KNOWN_USER_ID, KNOWN_USER_NAME, USER_KEY_COUNT};
use usercheck_domain::User;

use super::{expect, CheckResult, Mismatch};
use crate::fixtures::Fixture;
use crate::ports::UsersService;

fn request_for(id: &str) -> String {
    format!("GET /users/{id}")
}

/// `GET /users/{id}` must return exactly `expected`.
pub async fn get_user_matches(service: &dyn UsersService, expected: &User) -> CheckResult {
    let request = request_for(&expected.id);
    let observation = service.get_user(&expected.id).await?;
    expect::status(&request, &observation, 200)?;
    expect::json_content_type(&request, &observation)?;

    let body = expect::json_body(&request, &observation)?;
    expect::user_equals(&request, &body, expected)?;
    Ok(())
}

/// Spot-check a sample of fixture records, stopping at the first mismatch.
pub async fn get_sampled_users(service: &dyn UsersService, sample: &[&User]) -> CheckResult {
    for user in sample {
        get_user_matches(service, user).await?;
    }
    Ok(())
}

/// Fetch every fixture record in fixture order.
pub async fn get_every_user(service: &dyn UsersService, fixture: &Fixture) -> CheckResult {
    for (position, user) in fixture.users().iter().enumerate() {
        get_user_matches(service, user).await?;
        if (position + 1) % 500 == 0 {
            tracing::debug!(checked = position + 1, total = fixture.len(), "exhaustive lookup");
        }
    }
    Ok(())
}

/// The pinned record, asserted field by field rather than against the
/// fixture so a corrupted fixture cannot mask a wrong answer.
pub async fn get_known_user(service: &dyn UsersService) -> CheckResult {
    let request = request_for(KNOWN_USER_ID);
    let observation = service.get_user(KNOWN_USER_ID).await?;
    expect::status(&request, &observation, 200)?;
    expect::json_content_type(&request, &observation)?;

    let body = expect::json_body(&request, &observation)?;
    let Some(object) = body.as_object() else {
        return Err(Mismatch::body(
            &request,
            format!("expected a JSON object, got {}", expect::json_kind(&body)),
        )
        .into());
    };

    for (key, want) in
        [("id", KNOWN_USER_ID), ("name", KNOWN_USER_NAME), ("email", KNOWN_USER_EMAIL)]
    {
        let got = object.get(key).and_then(serde_json::Value::as_str);
        if got != Some(want) {
            return Err(Mismatch::body(
                &request,
                format!(
                    "field `{key}`: expected {want:?}, got {}",
                    object.get(key).map_or_else(|| "nothing".to_string(), ToString::to_string)
                ),
            )
            .into());
        }
    }

    if object.len() != USER_KEY_COUNT {
        return Err(Mismatch::body(
            &request,
            format!("expected exactly {USER_KEY_COUNT} keys, got {}", object.len()),
        )
        .into());
    }

    Ok(())
}

/// Fetch `user` `rounds` times; every answer must be a 200 carrying the
/// same body as the first.
pub async fn repeated_get_is_idempotent(
    service: &dyn UsersService,
    user: &User,
    rounds: usize,
) -> CheckResult {
    let request = request_for(&user.id);
    let mut first: Option<serde_json::Value> = None;

    for round in 0..rounds.max(2) {
        let observation = service.get_user(&user.id).await?;
        expect::status(&request, &observation, 200)?;
        let body = expect::json_body(&request, &observation)?;

        match &first {
            None => first = Some(body),
            Some(reference) if *reference != body => {
                return Err(Mismatch::body(
                    &request,
                    format!("response {} differs from the first response", round + 1),
                )
                .into());
            }
            Some(_) => {}
        }
    }

    Ok(())
}
