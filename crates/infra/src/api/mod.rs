//! Users service API client
//!
//! HTTP implementation of the `UsersService` port.

pub mod client;

pub use client::{UsersApiClient, UsersApiClientBuilder};
