//! Configuration structures
//!
//! `Config` is deserialised from JSON or TOML files by the infra loader, or
//! assembled from environment variables. Everything except `service.host`
//! has a default.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_IDEMPOTENCE_ROUNDS, DEFAULT_SAMPLE_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::errors::{Result, UsercheckError};

/// Top-level suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub suite: SuiteConfig,
}

/// Where the users service lives and how to talk to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service under test, e.g. `http://localhost:8080`
    pub host: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Knobs for the individual checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Number of fixture records spot-checked by id
    pub sample_size: usize,
    /// Fixed seed for the spot-check sample; `None` draws from entropy
    pub seed: Option<u64>,
    /// Also fetch every fixture record by id
    pub exhaustive: bool,
    /// Number of identical requests issued by the idempotence check
    pub idempotence_rounds: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            exhaustive: false,
            idempotence_rounds: DEFAULT_IDEMPOTENCE_ROUNDS,
        }
    }
}

impl ServiceConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), timeout_seconds: DEFAULT_TIMEOUT_SECS, user_agent: None }
    }

    /// Parse `host` into a base URL.
    ///
    /// # Errors
    /// Returns `UsercheckError::Config` when the host is not an absolute
    /// `http` or `https` URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.host)
            .map_err(|e| UsercheckError::Config(format!("Invalid host '{}': {}", self.host, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(UsercheckError::Config(format!(
                    "Unsupported scheme '{other}' in host '{}'",
                    self.host
                )))
            }
        }

        if url.cannot_be_a_base() {
            let message = format!("Host '{}' cannot be a base URL", self.host);
            return Err(UsercheckError::Config(message));
        }

        Ok(url)
    }
}

impl Config {
    pub fn for_host(host: impl Into<String>) -> Self {
        Self { service: ServiceConfig::new(host), suite: SuiteConfig::default() }
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `UsercheckError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.service.base_url()?;

        if self.service.timeout_seconds == 0 {
            return Err(UsercheckError::Config("timeout_seconds must be greater than 0".into()));
        }
        if self.suite.sample_size == 0 {
            return Err(UsercheckError::Config("sample_size must be at least 1".into()));
        }
        if self.suite.idempotence_rounds < 2 {
            return Err(UsercheckError::Config("idempotence_rounds must be at least 2".into()));
        }

        Ok(())
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
