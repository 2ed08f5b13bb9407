//! Identity resolution against the user API
//!
//! The redirect hands the flow a bearer token; this module resolves it to a
//! concrete [`Identity`] by fetching the "self" record. The token
//! authenticates that single request only, and a rejected token must never
//! re-invoke the login redirect machinery; a failure here is terminal for
//! the login attempt.

use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use crate::models::Identity;
use crate::settings::LoginflowSettings;

/// Per-request overrides for a self-identity fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Bearer credential for this single request
    pub token: String,
    /// Whether a failure may surface through the global error notification
    /// machinery; suppressed during login completion
    pub error_notification: bool,
    /// Whether a rejected credential may trigger automatic re-authentication;
    /// must stay `false` during login completion so a bad token cannot
    /// recursively restart the login redirect
    pub trigger_login: bool,
}

impl FetchOptions {
    /// Options used by the login completion flow: quiet, non-recursive
    #[must_use]
    pub fn for_login_completion(token: &str) -> Self {
        Self {
            token: token.to_string(),
            error_notification: false,
            trigger_login: false,
        }
    }
}

/// Identity resolution errors
///
/// The flow does not distinguish between these variants; every one surfaces
/// as `user_fetch_failed` on the error route.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The request never produced a response
    #[error("identity request failed: {0}")]
    Request(String),
    /// The identity service answered with a non-success status
    #[error("identity service returned status {0}")]
    Status(u16),
    /// The response body was not a valid identity record
    #[error("invalid identity record: {0}")]
    InvalidRecord(String),
}

/// Identity-fetch interface
///
/// A single attempt per login: no retry, no backoff, and no partial state on
/// failure.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Fetch the identity record for "self" using the supplied options.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response is not a valid identity record.
    async fn fetch_self(&self, options: &FetchOptions) -> Result<Identity, IdentityError>;
}

/// HTTP implementation of the identity-fetch interface
pub struct HttpIdentityService {
    client: reqwest::Client,
    api_base_url: String,
}

impl HttpIdentityService {
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &LoginflowSettings) -> Self {
        Self::new(&settings.identity.api_base_url)
    }

    fn self_url(&self) -> String {
        format!("{}/users/~", self.api_base_url)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn fetch_self(&self, options: &FetchOptions) -> Result<Identity, IdentityError> {
        let url = self.self_url();
        debug!("fetching self identity from {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&options.token)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // A rejected token ends the attempt here. trigger_login stays
            // false on the completion path, so no re-authentication is ever
            // started from this failure.
            if options.error_notification {
                log::error!("self identity fetch failed with status {status}");
            } else {
                debug!("self identity fetch failed with status {status}");
            }
            return Err(IdentityError::Status(status.as_u16()));
        }

        let identity = response
            .json::<Identity>()
            .await
            .map_err(|e| IdentityError::InvalidRecord(e.to_string()))?;

        debug!("resolved self identity: {}", identity.id);
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_completion_options_are_quiet_and_non_recursive() {
        let options = FetchOptions::for_login_completion("abc");
        assert_eq!(options.token, "abc");
        assert!(!options.error_notification);
        assert!(!options.trigger_login);
    }

    #[test]
    fn test_self_url_normalizes_trailing_slash() {
        let service = HttpIdentityService::new("https://api.example.test/");
        assert_eq!(service.self_url(), "https://api.example.test/users/~");

        let service = HttpIdentityService::new("https://api.example.test");
        assert_eq!(service.self_url(), "https://api.example.test/users/~");
    }

    #[test]
    fn test_identity_error_messages() {
        assert_eq!(
            IdentityError::Status(401).to_string(),
            "identity service returned status 401"
        );
        assert_eq!(
            IdentityError::Request("connection refused".to_string()).to_string(),
            "identity request failed: connection refused"
        );
    }
}
