//! Pre-built test data

use chrono::{TimeZone, Utc};

use crate::models::{Identity, LoginResult, ProviderError};

/// Default test bearer token
pub const TEST_TOKEN: &str = "abc";

/// Default test session lifetime hint
pub const TEST_TTL: u64 = 86_400;

/// Centralized factory for test data
pub struct TestFixtures;

impl TestFixtures {
    /// The identity the test token resolves to
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp is invalid (should never happen)
    #[must_use]
    pub fn identity() -> Identity {
        Identity {
            id: "user-1001".to_string(),
            display_name: "Test User".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    /// A different identity, for conflict scenarios
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp is invalid (should never happen)
    #[must_use]
    pub fn other_identity() -> Identity {
        Identity {
            id: "user-2002".to_string(),
            display_name: "Previous User".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 7, 15, 8, 30, 0).unwrap(),
        }
    }

    /// A finalized login result carrying the default test token
    #[must_use]
    pub fn login_result(verified: bool, return_to: Option<&str>) -> LoginResult {
        LoginResult {
            token: TEST_TOKEN.to_string(),
            return_to: return_to.map(ToString::to_string),
            verified,
            ttl: TEST_TTL,
        }
    }

    /// A provider error with all fields populated
    #[must_use]
    pub fn provider_error(error: &str) -> ProviderError {
        ProviderError {
            error: Some(error.to_string()),
            error_description: Some(format!("{error} description")),
            error_uri: Some(format!("https://idp.example/errors/{error}")),
        }
    }
}
