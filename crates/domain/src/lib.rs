//! # usercheck Domain
//!
//! Domain types shared by every usercheck crate.
//!
//! This crate contains:
//! - The `User` record and the `Observation` captured from the service
//! - Error types and the `Result` alias
//! - Configuration structures
//! - Well-known constants (known record, invalid and absent ids)
//!
//! ## Architecture
//! - No dependencies on other usercheck crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
