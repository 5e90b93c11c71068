//! # usercheck Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP client
//! - `UsersApiClient`, the HTTP implementation of `UsersService`
//! - Configuration loading from environment and files
//! - Conversions from external errors into `UsercheckError`
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `usercheck-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::UsersApiClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
