//! Command-line arguments and how they shape the configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use usercheck_core::CheckId;
use usercheck_domain::{Config, Result, UsercheckError};
use usercheck_infra::config;
use usercheck_infra::observability::LogFormat;

/// Report rendering on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Conformance suite for the users HTTP service
#[derive(Debug, Parser)]
#[command(name = "usercheck", version, about)]
pub struct Args {
    /// Base URL of the service under test (overrides USERCHECK_HOST)
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// Read configuration from this JSON or TOML file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of fixture records spot-checked by id
    #[arg(long, value_name = "N")]
    pub sample_size: Option<usize>,

    /// Seed for the spot-check sample
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also fetch every fixture record by id
    #[arg(long)]
    pub exhaustive: bool,

    /// Run only this check; repeat to run several
    #[arg(long = "check", value_name = "NAME")]
    pub checks: Vec<CheckId>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log line format on stderr (pretty or json)
    #[arg(long, value_name = "FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Args {
    /// Load the base configuration and apply the flag overrides.
    ///
    /// An explicit `--config` wins. Otherwise the environment is used when
    /// `USERCHECK_HOST` is set, then the probed config files, and finally
    /// `--host` with the remaining environment variables.
    ///
    /// # Errors
    /// Returns `UsercheckError::Config` if no configuration can be found or
    /// an environment variable has an invalid value.
    pub fn resolve_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => config::load_from_file(Some(path.clone()))?,
            None if config::host_from_env().is_some() => config::load_from_env()?,
            None => match (config::probe_config_paths(), &self.host) {
                (Some(path), _) => config::load_from_file(Some(path))?,
                (None, Some(host)) => config::load_from_env_with_host(host.clone())?,
                (None, None) => config::load_from_env()?,
            },
        };

        Ok(self.apply_overrides(config))
    }

    /// Overlay every flag that was given on top of `config`.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(host) = &self.host {
            config.service.host.clone_from(host);
        }
        if let Some(timeout) = self.timeout {
            config.service.timeout_seconds = timeout;
        }
        if let Some(sample_size) = self.sample_size {
            config.suite.sample_size = sample_size;
        }
        if self.seed.is_some() {
            config.suite.seed = self.seed;
        }
        if self.exhaustive {
            config.suite.exhaustive = true;
        }
        config
    }

    /// Checks to run, or `None` for the suite's enabled set.
    ///
    /// # Errors
    /// Returns `UsercheckError::InvalidInput` when `get_every_user` is
    /// requested without an exhaustive configuration.
    pub fn selected_checks(&self, config: &Config) -> Result<Option<Vec<CheckId>>> {
        if self.checks.is_empty() {
            return Ok(None);
        }
        if self.checks.contains(&CheckId::GetEveryUser) && !config.suite.exhaustive {
            return Err(UsercheckError::InvalidInput(
                "get_every_user requires --exhaustive".into(),
            ));
        }
        Ok(Some(self.checks.clone()))
    }
}
