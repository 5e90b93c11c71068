//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use usercheck_domain::UsercheckError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub UsercheckError);

impl From<InfraError> for UsercheckError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<UsercheckError> for InfraError {
    fn from(value: UsercheckError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoUsercheckError {
    fn into_usercheck(self) -> UsercheckError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → UsercheckError */
/* -------------------------------------------------------------------------- */

impl IntoUsercheckError for HttpError {
    fn into_usercheck(self) -> UsercheckError {
        let target = self.url().map_or_else(|| "<unknown url>".to_string(), ToString::to_string);

        if self.is_builder() {
            return UsercheckError::Config(format!("Invalid HTTP request for {target}: {self}"));
        }

        if self.is_timeout() {
            return UsercheckError::Network(format!("HTTP request to {target} timed out"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return UsercheckError::Network(format!("HTTP connection failure to {target}"));
        }

        if self.is_body() || self.is_decode() {
            return UsercheckError::Network(format!(
                "Failed to read HTTP response body from {target}: {self}"
            ));
        }

        UsercheckError::Network(format!("HTTP request to {target} failed: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_usercheck())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
