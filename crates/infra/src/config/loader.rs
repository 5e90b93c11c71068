//! Configuration loader
//!
//! Loads the suite configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `USERCHECK_HOST` is missing, falls back to loading from file. Any
//!    other invalid variable is an error
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `USERCHECK_HOST`: Base URL of the users service (required)
//! - `USERCHECK_TIMEOUT_SECS`: Request timeout in seconds
//! - `USERCHECK_USER_AGENT`: User agent sent with every request
//! - `USERCHECK_SAMPLE_SIZE`: Number of records spot-checked by id
//! - `USERCHECK_SEED`: Fixed seed for the spot-check sample
//! - `USERCHECK_EXHAUSTIVE`: Also fetch every record by id (true/false)
//! - `USERCHECK_IDEMPOTENCE_ROUNDS`: Requests issued by the idempotence check
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./usercheck.json` or `./usercheck.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../usercheck.json` or `../usercheck.toml` (parent directory)
//! 4. `../../usercheck.json` or `../../usercheck.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use usercheck_domain::constants::{
    DEFAULT_IDEMPOTENCE_ROUNDS, DEFAULT_SAMPLE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use usercheck_domain::{Config, Result, ServiceConfig, SuiteConfig, UsercheckError};

pub const ENV_HOST: &str = "USERCHECK_HOST";
pub const ENV_TIMEOUT_SECS: &str = "USERCHECK_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "USERCHECK_USER_AGENT";
pub const ENV_SAMPLE_SIZE: &str = "USERCHECK_SAMPLE_SIZE";
pub const ENV_SEED: &str = "USERCHECK_SEED";
pub const ENV_EXHAUSTIVE: &str = "USERCHECK_EXHAUSTIVE";
pub const ENV_IDEMPOTENCE_ROUNDS: &str = "USERCHECK_IDEMPOTENCE_ROUNDS";

/// Load configuration with automatic fallback strategy
///
/// Loads from environment variables when `USERCHECK_HOST` is set. Only a
/// missing host falls back to a config file; an invalid environment value
/// is an error.
///
/// # Errors
/// Returns `UsercheckError::Config` if:
/// - Configuration cannot be loaded from either source
/// - An environment variable has an invalid value
/// - File format is invalid
/// - A value is out of range
pub fn load() -> Result<Config> {
    let config = if host_from_env().is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        tracing::debug!("{ENV_HOST} is not set, trying file");
        load_from_file(None)?
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `USERCHECK_HOST` must be present; every other variable falls back to
/// its default.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `UsercheckError::Config` if the host is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    load_from_env_with_host(env_var(ENV_HOST)?)
}

/// Load configuration for `host`, reading every optional variable from the
/// environment.
///
/// Used when the host comes from somewhere other than `USERCHECK_HOST`,
/// such as a command-line flag.
///
/// # Errors
/// Returns `UsercheckError::Config` if an optional variable has an invalid
/// value.
pub fn load_from_env_with_host(host: String) -> Result<Config> {
    let timeout_seconds = env_parse(ENV_TIMEOUT_SECS, "timeout")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    let user_agent = std::env::var(ENV_USER_AGENT).ok();

    let sample_size = env_parse(ENV_SAMPLE_SIZE, "sample size")?.unwrap_or(DEFAULT_SAMPLE_SIZE);
    let seed = env_parse(ENV_SEED, "seed")?;
    let exhaustive = env_bool(ENV_EXHAUSTIVE, false);
    let idempotence_rounds = env_parse(ENV_IDEMPOTENCE_ROUNDS, "idempotence rounds")?
        .unwrap_or(DEFAULT_IDEMPOTENCE_ROUNDS);

    Ok(Config {
        service: ServiceConfig { host, timeout_seconds, user_agent },
        suite: SuiteConfig { sample_size, seed, exhaustive, idempotence_rounds },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `UsercheckError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(UsercheckError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            UsercheckError::Config(format!(
                "{ENV_HOST} is not set and no config file was found in the standard locations"
            ))
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| UsercheckError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `UsercheckError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| UsercheckError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| UsercheckError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(UsercheckError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./usercheck.{json,toml}`,
///    `./config.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("usercheck.json"),
        dir.join("usercheck.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../usercheck.json"),
        dir.join("../usercheck.toml"),
        dir.join("../../usercheck.json"),
        dir.join("../../usercheck.toml"),
    ]
}

/// Value of `USERCHECK_HOST`, if set.
pub fn host_from_env() -> Option<String> {
    std::env::var(ENV_HOST).ok()
}

/// Get required environment variable
///
/// # Errors
/// Returns `UsercheckError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        UsercheckError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `UsercheckError::Config` if the variable is set but does not
/// parse.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| UsercheckError::Config(format!("Invalid {what} in {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Arguments
/// * `key` - Environment variable name
/// * `default` - Default value if variable is not set
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
