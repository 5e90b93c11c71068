//! Shared helpers for `usercheck-infra` integration tests.
//!
//! [`FakeUsersService`] is a wiremock server that answers like a conforming
//! users service backed by the embedded fixture. A [`Deviation`] makes it
//! break one part of the contract.

#![allow(dead_code)]

use serde_json::{json, Value};
use usercheck_core::Fixture;
use usercheck_domain::constants::{ABSENT_USER_ID, INVALID_USER_ID, KNOWN_USER_ID};
use usercheck_domain::{Config, User};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Ways the fake service can deviate from the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deviation {
    HealthStatus(u16),
    /// List served with this `Content-Type`
    ListContentType(&'static str),
    ListOmitsLastRecord,
    /// Known record carries an extra key
    KnownUserExtraKey,
    InvalidIdStatus(u16),
    /// Responses take longer than this many milliseconds
    Slow(u64),
}

/// A wiremock server impersonating the users service.
pub struct FakeUsersService {
    server: MockServer,
    prefix: String,
}

impl FakeUsersService {
    /// Conforming service at the server root.
    pub async fn start() -> Self {
        Self::start_with(Vec::new(), "").await
    }

    pub async fn deviating(deviation: Deviation) -> Self {
        Self::start_with(vec![deviation], "").await
    }

    /// Conforming service mounted below `prefix`, e.g. `/api/v1`.
    pub async fn with_prefix(prefix: &str) -> Self {
        Self::start_with(Vec::new(), prefix).await
    }

    async fn start_with(deviations: Vec<Deviation>, prefix: &str) -> Self {
        let server = MockServer::start().await;
        let fixture = Fixture::embedded().expect("embedded fixture should load");
        let prefix = prefix.trim_end_matches('/').to_string();
        let routed_prefix = prefix.clone();

        Mock::given(method("GET"))
            .and(path_regex(format!("^{prefix}/users")))
            .respond_with(move |request: &Request| {
                respond(fixture, &deviations, &routed_prefix, request)
            })
            .mount(&server)
            .await;

        Self { server, prefix }
    }

    /// Base URL to configure the suite with.
    pub fn host(&self) -> String {
        format!("{}{}", self.server.uri(), self.prefix)
    }

    pub fn config(&self) -> Config {
        let mut config = Config::for_host(self.host());
        config.suite.seed = Some(7);
        config
    }

    /// Paths of every request the server received.
    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

fn respond(
    fixture: &Fixture,
    deviations: &[Deviation],
    prefix: &str,
    request: &Request,
) -> ResponseTemplate {
    let template = route(fixture, deviations, prefix, request);
    match deviations.iter().find_map(|d| match d {
        Deviation::Slow(ms) => Some(*ms),
        _ => None,
    }) {
        Some(ms) => template.set_delay(std::time::Duration::from_millis(ms)),
        None => template,
    }
}

fn route(
    fixture: &Fixture,
    deviations: &[Deviation],
    prefix: &str,
    request: &Request,
) -> ResponseTemplate {
    let path = request.url.path().strip_prefix(prefix).unwrap_or_default();

    match path {
        "/users/health" => {
            let status = deviations
                .iter()
                .find_map(|d| match d {
                    Deviation::HealthStatus(status) => Some(*status),
                    _ => None,
                })
                .unwrap_or(200);
            ResponseTemplate::new(status).set_body_string("OK")
        }
        "/users" => list(fixture, deviations),
        other => match other.strip_prefix("/users/") {
            Some(id) => lookup(fixture, deviations, id),
            None => not_found(),
        },
    }
}

fn list(fixture: &Fixture, deviations: &[Deviation]) -> ResponseTemplate {
    let mut records: Vec<Value> = fixture.users().iter().map(User::to_json).collect();
    if deviations.contains(&Deviation::ListOmitsLastRecord) {
        records.pop();
    }

    let body = serde_json::to_vec(&records).expect("records should serialize");
    let content_type = deviations
        .iter()
        .find_map(|d| match d {
            Deviation::ListContentType(value) => Some(*value),
            _ => None,
        })
        .unwrap_or("application/json");

    ResponseTemplate::new(200).set_body_raw(body, content_type)
}

fn lookup(fixture: &Fixture, deviations: &[Deviation], id: &str) -> ResponseTemplate {
    if id == INVALID_USER_ID {
        if let Some(status) = deviations.iter().find_map(|d| match d {
            Deviation::InvalidIdStatus(status) => Some(*status),
            _ => None,
        }) {
            return ResponseTemplate::new(status).set_body_json(json!({ "error": "bad id" }));
        }
    }
    if id == ABSENT_USER_ID {
        return not_found();
    }

    match fixture.get(id) {
        Some(user) => {
            let mut value = user.to_json();
            if id == KNOWN_USER_ID && deviations.contains(&Deviation::KnownUserExtraKey) {
                value["created_at"] = json!("2024-01-01T00:00:00Z");
            }
            ResponseTemplate::new(200).set_body_json(value)
        }
        None => not_found(),
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" }))
}
