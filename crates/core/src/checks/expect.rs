//! Assertion helpers shared by the checks
//!
//! Each helper returns the first [`Mismatch`] it finds.

use serde_json::Value;
use usercheck_domain::constants::JSON_MEDIA_TYPE;
use usercheck_domain::{Observation, User};

use super::Mismatch;

/// Assert the response status.
pub fn status(request: &str, observation: &Observation, expected: u16) -> Result<(), Mismatch> {
    if observation.status == expected {
        Ok(())
    } else {
        Err(Mismatch::Status {
            request: request.to_string(),
            expected,
            actual: observation.status,
        })
    }
}

/// Assert `Content-Type: application/json`.
///
/// Only the media type is compared; parameters such as `charset` are
/// ignored.
pub fn json_content_type(request: &str, observation: &Observation) -> Result<(), Mismatch> {
    let is_json = observation
        .content_type
        .as_deref()
        .and_then(|raw| raw.parse::<mime::Mime>().ok())
        .is_some_and(|media| media.essence_str().eq_ignore_ascii_case(JSON_MEDIA_TYPE));

    if is_json {
        Ok(())
    } else {
        Err(Mismatch::ContentType {
            request: request.to_string(),
            expected: JSON_MEDIA_TYPE.to_string(),
            actual: observation.content_type.clone(),
        })
    }
}

/// Parse the body as JSON.
pub fn json_body(request: &str, observation: &Observation) -> Result<Value, Mismatch> {
    serde_json::from_str(&observation.body)
        .map_err(|e| Mismatch::body(request, format!("body is not valid JSON: {e}")))
}

/// Assert a JSON value is exactly the object form of `expected`.
pub fn user_equals(request: &str, actual: &Value, expected: &User) -> Result<(), Mismatch> {
    match user_difference(actual, expected) {
        None => Ok(()),
        Some(detail) => Err(Mismatch::body(request, detail)),
    }
}

/// Describe how `actual` differs from `expected`, or `None` if equal.
pub fn user_difference(actual: &Value, expected: &User) -> Option<String> {
    let expected_json = expected.to_json();
    if *actual == expected_json {
        return None;
    }

    let Some(object) = actual.as_object() else {
        return Some(format!("expected a JSON object, got {}", json_kind(actual)));
    };

    let mut unexpected: Vec<&str> =
        object.keys().map(String::as_str).filter(|key| expected_json.get(key).is_none()).collect();
    if !unexpected.is_empty() {
        unexpected.sort_unstable();
        return Some(format!("unexpected keys: {}", unexpected.join(", ")));
    }

    for (key, want) in [("id", &expected.id), ("name", &expected.name), ("email", &expected.email)]
    {
        match object.get(key) {
            None => return Some(format!("missing key `{key}`")),
            Some(got) if got.as_str() != Some(want.as_str()) => {
                return Some(format!("field `{key}`: expected {want:?}, got {got}"));
            }
            Some(_) => {}
        }
    }

    Some("object differs from fixture record".to_string())
}

/// Human name of a JSON value's type.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
