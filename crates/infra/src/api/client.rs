//! Users API client
//!
//! Issues the three read requests of the users service with
//! `Accept: application/json` and hands the raw observations to the checks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use tracing::instrument;
use url::Url;
use usercheck_core::UsersService;
use usercheck_domain::constants::JSON_MEDIA_TYPE;
use usercheck_domain::{Observation, Result, ServiceConfig, UsercheckError};

use crate::http::HttpClient;

/// User agent sent when the configuration does not name one.
pub const DEFAULT_USER_AGENT: &str = concat!("usercheck/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`UsersApiClient`]
#[derive(Debug, Clone)]
pub struct UsersApiClientConfig {
    /// Base URL of the service, possibly with a path prefix
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl UsersApiClientConfig {
    /// # Errors
    /// Returns `UsercheckError::Config` if the host is not a usable base URL.
    pub fn from_service(service: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            base_url: service.base_url()?,
            timeout: Duration::from_secs(service.timeout_seconds),
            user_agent: service
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

/// HTTP client for the users service
#[derive(Debug, Clone)]
pub struct UsersApiClient {
    http_client: HttpClient,
    config: UsersApiClientConfig,
}

impl UsersApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HttpClient cannot be created
    pub fn new(config: UsersApiClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));

        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| UsercheckError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client, config })
    }

    /// Build a client straight from the service section of the config
    ///
    /// # Errors
    ///
    /// Returns `UsercheckError::Config` for an unusable host
    pub fn from_service_config(service: &ServiceConfig) -> Result<Self> {
        Self::new(UsersApiClientConfig::from_service(service)?)
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> UsersApiClientBuilder {
        UsersApiClientBuilder::default()
    }

    /// URL of `segments` appended to the base URL, each percent-encoded as a
    /// single path segment.
    ///
    /// # Errors
    ///
    /// Returns `UsercheckError::Config` if the base URL cannot take path
    /// segments
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                UsercheckError::Config(format!(
                    "Base URL {} cannot carry path segments",
                    self.config.base_url
                ))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get(&self, segments: &[&str]) -> Result<Observation> {
        let url = self.endpoint(segments)?;
        self.http_client.observe(self.http_client.request(Method::GET, url)).await
    }
}

#[async_trait]
impl UsersService for UsersApiClient {
    #[instrument(skip(self))]
    async fn health(&self) -> Result<Observation> {
        self.get(&["users", "health"]).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Observation> {
        self.get(&["users"]).await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: &str) -> Result<Observation> {
        self.get(&["users", id]).await
    }
}

/// Builder for [`UsersApiClient`]
#[derive(Debug, Default)]
pub struct UsersApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl UsersApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    ///
    /// Returns `UsercheckError::Config` if no base URL was given or it is
    /// not an absolute http(s) URL
    pub fn build(self) -> Result<UsersApiClient> {
        let host = self
            .base_url
            .ok_or_else(|| UsercheckError::Config("base_url is required".into()))?;

        let mut service = ServiceConfig::new(host);
        service.user_agent = self.user_agent;

        let mut config = UsersApiClientConfig::from_service(&service)?;
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        UsersApiClient::new(config)
    }
}
