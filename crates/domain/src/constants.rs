//! Suite constants
//!
//! Well-known identifiers and defaults shared by the checks, the config
//! loader and the tests.

/// Id of the record the known-user check pins field by field.
pub const KNOWN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Expected `name` of [`KNOWN_USER_ID`].
pub const KNOWN_USER_NAME: &str = "Ms. Jailyn Reichert MD";
/// Expected `email` of [`KNOWN_USER_ID`].
pub const KNOWN_USER_EMAIL: &str = "elbert@example.org";
/// Number of keys every user object carries (`id`, `name`, `email`).
pub const USER_KEY_COUNT: usize = 3;

/// Syntactically invalid id; the service must answer 404.
pub const INVALID_USER_ID: &str = "invalid-id";
/// Well-formed UUID that is never part of the fixture; the service must
/// answer 404.
pub const ABSENT_USER_ID: &str = "ffffffff-ffff-ffff-ffff-ffffffffffff";

/// Media type every successful response must declare.
pub const JSON_MEDIA_TYPE: &str = "application/json";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SAMPLE_SIZE: usize = 10;
pub const DEFAULT_IDEMPOTENCE_ROUNDS: usize = 2;
