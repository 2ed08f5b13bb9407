//! Mock and recording implementations of the collaborator traits

use async_trait::async_trait;
use std::sync::Mutex;

use crate::flow::RedirectFinalizer;
use crate::identity::{FetchOptions, IdentityError, IdentityService};
use crate::models::{Identity, LoginResult, ProviderError};
use crate::navigation::Navigator;
use crate::telemetry::{SessionObserved, SessionObserver};

/// Redirect finalizer that resolves to a fixed outcome
pub struct MockRedirectFinalizer {
    outcome: Result<LoginResult, ProviderError>,
}

impl MockRedirectFinalizer {
    /// Finalizer that yields a successful login result
    #[must_use]
    pub fn success(result: LoginResult) -> Self {
        Self {
            outcome: Ok(result),
        }
    }

    /// Finalizer that yields a provider error
    #[must_use]
    pub fn failure(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl RedirectFinalizer for MockRedirectFinalizer {
    async fn finish(&self) -> Result<LoginResult, ProviderError> {
        self.outcome.clone()
    }
}

/// Identity service with a fixed outcome that records every fetch
pub struct MockIdentityService {
    outcome: Result<Identity, IdentityError>,
    calls: Mutex<Vec<FetchOptions>>,
}

impl MockIdentityService {
    /// Service that resolves every token to the given identity
    #[must_use]
    pub fn succeeding(identity: Identity) -> Self {
        Self {
            outcome: Ok(identity),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Service for which every fetch fails
    #[must_use]
    pub fn failing(error: IdentityError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The options of every fetch made so far
    ///
    /// # Panics
    ///
    /// Panics if the recording lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<FetchOptions> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn fetch_self(&self, options: &FetchOptions) -> Result<Identity, IdentityError> {
        self.calls.lock().unwrap().push(options.clone());
        self.outcome.clone()
    }
}

/// Navigator that records every replaced location
#[derive(Default)]
pub struct RecordingNavigator {
    locations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every location replaced so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the recording lock is poisoned.
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        self.locations.lock().unwrap().clone()
    }

    /// The most recently replaced location
    ///
    /// # Panics
    ///
    /// Panics if the recording lock is poisoned.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.locations.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn replace_location(&self, path: &str) {
        self.locations.lock().unwrap().push(path.to_string());
    }
}

/// Observer that records every published event
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SessionObserved>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event published so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the recording lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<SessionObserved> {
        self.events.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn session_observed(&self, event: &SessionObserved) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestFixtures;

    #[tokio::test]
    async fn test_mock_finalizer_outcomes() {
        let success =
            MockRedirectFinalizer::success(TestFixtures::login_result(true, Some("/dash")));
        assert!(success.finish().await.is_ok());

        let failure = MockRedirectFinalizer::failure(TestFixtures::provider_error("access_denied"));
        let err = failure.finish().await.unwrap_err();
        assert_eq!(err.error.as_deref(), Some("access_denied"));
    }

    #[tokio::test]
    async fn test_mock_identity_service_records_calls() {
        let service = MockIdentityService::succeeding(TestFixtures::identity());
        let options = FetchOptions::for_login_completion("abc");

        let identity = service.fetch_self(&options).await.unwrap();
        assert_eq!(identity, TestFixtures::identity());

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token, "abc");
    }

    #[test]
    fn test_recording_navigator_order() {
        let navigator = RecordingNavigator::new();
        navigator.replace_location("/first");
        navigator.replace_location("/second");

        assert_eq!(
            navigator.locations(),
            vec!["/first".to_string(), "/second".to_string()]
        );
        assert_eq!(navigator.last().as_deref(), Some("/second"));
    }
}
