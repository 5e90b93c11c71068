//! Embedded user fixture
//!
//! The expected-data baseline: 5000 synthetic user records compiled into the
//! binary from `data/users.json`. The list is parsed and validated once per
//! process and then shared read-only.
//!
//! For deterministic sampling, pass a seeded RNG to [`Fixture::sample`].

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use rand::seq::SliceRandom;
use rand::Rng;
use usercheck_domain::constants::ABSENT_USER_ID;
use usercheck_domain::{Result, User, UsercheckError};
use uuid::Uuid;

const EMBEDDED_USERS: &str = include_str!("../data/users.json");

/// Number of records in the embedded dataset.
pub const EMBEDDED_RECORD_COUNT: usize = 5000;

static EMBEDDED: OnceCell<Fixture> = OnceCell::new();

/// Ordered, validated list of user records with an id index.
#[derive(Debug, Clone)]
pub struct Fixture {
    users: Vec<User>,
    index: HashMap<String, usize>,
}

impl Fixture {
    /// The embedded dataset, parsed on first use.
    ///
    /// # Errors
    /// Returns `UsercheckError::Fixture` if the embedded data is malformed.
    pub fn embedded() -> Result<&'static Self> {
        EMBEDDED.get_or_try_init(|| Self::from_json(EMBEDDED_USERS))
    }

    /// Parse a JSON array of records.
    ///
    /// # Errors
    /// Returns `UsercheckError::Fixture` when the JSON does not describe a
    /// list of `{id, name, email}` objects or fails validation.
    pub fn from_json(raw: &str) -> Result<Self> {
        let users: Vec<User> = serde_json::from_str(raw)
            .map_err(|e| UsercheckError::Fixture(format!("Invalid fixture JSON: {e}")))?;
        Self::from_users(users)
    }

    /// Build a fixture from records, preserving their order.
    ///
    /// # Errors
    /// Returns `UsercheckError::Fixture` if the list is empty, an id is not
    /// a UUID, an id repeats, or the reserved absent id is present.
    pub fn from_users(users: Vec<User>) -> Result<Self> {
        if users.is_empty() {
            return Err(UsercheckError::Fixture("fixture contains no records".into()));
        }

        let mut index = HashMap::with_capacity(users.len());
        for (position, user) in users.iter().enumerate() {
            Uuid::parse_str(&user.id).map_err(|e| {
                UsercheckError::Fixture(format!(
                    "record {position} has id '{}' which is not a UUID: {e}",
                    user.id
                ))
            })?;

            if user.id.eq_ignore_ascii_case(ABSENT_USER_ID) {
                return Err(UsercheckError::Fixture(format!(
                    "record {position} uses the reserved absent id {ABSENT_USER_ID}"
                )));
            }

            if let Some(previous) = index.insert(user.id.clone(), position) {
                return Err(UsercheckError::Fixture(format!(
                    "records {previous} and {position} share id '{}'",
                    user.id
                )));
            }
        }

        Ok(Self { users, index })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Records in fixture order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.index.get(id).map(|&position| &self.users[position])
    }

    /// Whether an identical record (all three fields) is in the fixture.
    pub fn contains(&self, user: &User) -> bool {
        self.get(&user.id).is_some_and(|known| known == user)
    }

    /// Up to `amount` distinct records, drawn without replacement.
    pub fn sample<R: Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Vec<&User> {
        self.users.choose_multiple(rng, amount.min(self.users.len())).collect()
    }

    /// One record chosen at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&User> {
        self.users.choose(rng)
    }
}
