//! Shared test helpers for `usercheck-core` integration tests.
//!
//! [`InMemoryUsersService`] answers like a conforming users service backed
//! by a fixture, unless told to misbehave through a [`Fault`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use usercheck_core::{Fixture, UsersService};
use usercheck_domain::{Observation, Result as DomainResult, User, UsercheckError};

/// Ways the in-memory service can deviate from the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    HealthStatus(u16),
    ListContentType(&'static str),
    ListDropsLastRecord,
    ListRepeatsFirstRecord,
    ListReversed,
    RenameUser(String),
    ExtraKeyOn(String),
    InvalidIdStatus(u16),
    AbsentIdStatus(u16),
    /// Every lookup after the first returns a different name
    DriftingLookups,
    Unreachable,
}

/// In-memory implementation of `UsersService`.
pub struct InMemoryUsersService {
    users: Vec<User>,
    faults: Vec<Fault>,
    lookups: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl InMemoryUsersService {
    /// Conforming service serving the fixture's records.
    pub fn new(fixture: &Fixture) -> Self {
        Self {
            users: fixture.users().to_vec(),
            faults: Vec::new(),
            lookups: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Add a deviation.
    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Ids passed to `get_user`, in call order.
    pub fn requested_ids(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn has(&self, fault: &Fault) -> bool {
        self.faults.contains(fault)
    }

    fn check_reachable(&self) -> DomainResult<()> {
        if self.has(&Fault::Unreachable) {
            Err(UsercheckError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }

    fn render(&self, user: &User) -> serde_json::Value {
        let mut value = user.to_json();
        if self.has(&Fault::RenameUser(user.id.clone())) {
            value["name"] = serde_json::json!("Renamed Person");
        }
        if self.has(&Fault::ExtraKeyOn(user.id.clone())) {
            value["role"] = serde_json::json!("admin");
        }
        value
    }
}

#[async_trait]
impl UsersService for InMemoryUsersService {
    async fn health(&self) -> DomainResult<Observation> {
        self.check_reachable()?;
        let status = self
            .faults
            .iter()
            .find_map(|fault| match fault {
                Fault::HealthStatus(status) => Some(*status),
                _ => None,
            })
            .unwrap_or(200);
        Ok(Observation::new(status, Some("text/plain".into()), "ok"))
    }

    async fn list_users(&self) -> DomainResult<Observation> {
        self.check_reachable()?;
        let mut records: Vec<serde_json::Value> =
            self.users.iter().map(|u| self.render(u)).collect();

        if self.has(&Fault::ListDropsLastRecord) {
            records.pop();
        }
        if self.has(&Fault::ListRepeatsFirstRecord) {
            let first = records[0].clone();
            let last = records.len() - 1;
            records[last] = first;
        }
        if self.has(&Fault::ListReversed) {
            records.reverse();
        }

        let content_type = self
            .faults
            .iter()
            .find_map(|fault| match fault {
                Fault::ListContentType(value) => Some((*value).to_string()),
                _ => None,
            })
            .unwrap_or_else(|| "application/json".to_string());

        let body = serde_json::to_string(&records).unwrap();
        Ok(Observation::new(200, Some(content_type), body))
    }

    async fn get_user(&self, id: &str) -> DomainResult<Observation> {
        self.check_reachable()?;
        self.requested.lock().unwrap().push(id.to_string());
        let call = self.lookups.fetch_add(1, Ordering::SeqCst);

        let override_status = self.faults.iter().find_map(|fault| match fault {
            Fault::InvalidIdStatus(status) if id == "invalid-id" => Some(*status),
            Fault::AbsentIdStatus(status) if id == "ffffffff-ffff-ffff-ffff-ffffffffffff" => {
                Some(*status)
            }
            _ => None,
        });

        if let Some(status) = override_status {
            return Ok(Observation::json(status, r#"{"error":"bad request"}"#));
        }

        match self.users.iter().find(|user| user.id == id) {
            Some(user) => {
                let mut value = self.render(user);
                if self.has(&Fault::DriftingLookups) && call > 0 {
                    value["name"] = serde_json::json!(format!("Drift {call}"));
                }
                Ok(Observation::json(200, value.to_string()))
            }
            None => Ok(Observation::json(404, r#"{"error":"not found"}"#)),
        }
    }
}
