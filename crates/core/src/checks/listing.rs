//! List endpoint check

use std::collections::HashSet;

use serde_json::Value;

use super::{expect, CheckResult, Mismatch};
use crate::fixtures::Fixture;
use crate::ports::UsersService;

pub const REQUEST: &str = "GET /users";

/// `GET /users` must return exactly the fixture set.
///
/// The array length must equal the fixture length and every element must be
/// a fixture record. Order is not significant; a repeated record is a body
/// mismatch, so together the two rules give set equality.
pub async fn list_users(service: &dyn UsersService, fixture: &Fixture) -> CheckResult {
    let observation = service.list_users().await?;
    expect::status(REQUEST, &observation, 200)?;
    expect::json_content_type(REQUEST, &observation)?;

    let body = expect::json_body(REQUEST, &observation)?;
    let Some(records) = body.as_array() else {
        return Err(Mismatch::body(
            REQUEST,
            format!("expected a JSON array, got {}", expect::json_kind(&body)),
        )
        .into());
    };

    if records.len() != fixture.len() {
        return Err(Mismatch::Cardinality {
            request: REQUEST.to_string(),
            expected: fixture.len(),
            actual: records.len(),
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let Some(id) = record.get("id").and_then(Value::as_str) else {
            return Err(Mismatch::body(REQUEST, format!("record {position} has no string `id`"))
                .into());
        };

        let Some(expected) = fixture.get(id) else {
            return Err(Mismatch::body(
                REQUEST,
                format!("record {position} ({id}) is not in the fixture"),
            )
            .into());
        };

        if let Some(detail) = expect::user_difference(record, expected) {
            let detail = format!("record {position} ({id}): {detail}");
            return Err(Mismatch::body(REQUEST, detail).into());
        }

        if !seen.insert(id) {
            return Err(
                Mismatch::body(REQUEST, format!("record {position} repeats id {id}")).into()
            );
        }
    }

    Ok(())
}
