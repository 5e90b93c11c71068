//! # usercheck Core
//!
//! Conformance logic for the users service - no HTTP code.
//!
//! This crate contains:
//! - The embedded fixture of 5000 user records
//! - The `UsersService` port the checks talk through
//! - The checks themselves and the mismatch taxonomy
//! - The suite runner and its report
//!
//! ## Architecture Principles
//! - Only depends on `usercheck-domain`
//! - All I/O goes through the `UsersService` trait
//! - Checks run strictly one request at a time

pub mod checks;
pub mod fixtures;
pub mod ports;
pub mod suite;

// Re-export specific items to avoid ambiguity
pub use checks::{CheckFailure, CheckId, CheckOutcome, CheckStatus, Mismatch};
pub use fixtures::Fixture;
pub use ports::UsersService;
pub use suite::{ConformanceSuite, SuiteContext, SuiteReport};
