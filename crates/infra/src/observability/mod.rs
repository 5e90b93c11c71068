//! Observability infrastructure
//!
//! Installs the global `tracing` subscriber used by the runner binary and the
//! live integration tests. Log lines always go to stderr so that stdout stays
//! free for the suite report.

mod logging;

pub use logging::{init_tracing, LogFormat, DEFAULT_FILTER};
