//! Core data types for the login completion flow
//!
//! These records carry the untrusted redirect-supplied data (token, requested
//! destination, provider error codes) across the boundary into application
//! state. They are produced by external collaborators and consumed exactly
//! once by the flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Finalized result of a successful OAuth redirect
///
/// Produced by the redirect finalizer, consumed once by [`crate::LoginFlow`].
/// `return_to` is caller-requested and untrusted; `ttl` is an opaque session
/// lifetime hint passed through to the session store unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub return_to: Option<String>,
    pub verified: bool,
    pub ttl: u64,
}

/// Error reported by the identity provider on the redirect
///
/// All fields are optional; the absence of `error` does not make the redirect
/// a success. The fields are surfaced verbatim on the error route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderError {
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provider error: {}",
            self.error.as_deref().unwrap_or("(unspecified)")
        )?;
        if let Some(description) = &self.error_description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProviderError {}

/// Identity record resolved from a bearer token
///
/// Fetched from the identity service and treated as read-only by the flow.
/// The wire format is camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable unique identifier
    pub id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError {
            error: Some("access_denied".to_string()),
            error_description: Some("user denied consent".to_string()),
            error_uri: None,
        };
        assert_eq!(
            err.to_string(),
            "provider error: access_denied: user denied consent"
        );

        let bare = ProviderError::default();
        assert_eq!(bare.to_string(), "provider error: (unspecified)");
    }

    #[test]
    fn test_identity_wire_format() {
        let json = r#"{
            "id": "c2a0f9b4",
            "displayName": "Jan Novak",
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;

        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, "c2a0f9b4");
        assert_eq!(identity.display_name, "Jan Novak");
        assert_eq!(identity.created_at.timestamp(), 1_709_294_400);
    }

    #[test]
    fn test_login_result_roundtrip_keeps_ttl_opaque() {
        let result = LoginResult {
            token: "abc".to_string(),
            return_to: Some("/projects/42".to_string()),
            verified: false,
            ttl: 86_400,
        };

        let encoded = serde_json::to_string(&result).unwrap();
        let decoded: LoginResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.ttl, 86_400);
        assert_eq!(decoded.return_to.as_deref(), Some("/projects/42"));
        assert!(!decoded.verified);
    }
}
