//! Login completion state machine
//!
//! One [`LoginFlow`] instance is created per load of the OAuth callback
//! route and driven exactly once: finalize the redirect, resolve the token
//! to an identity, then either activate the session automatically or expose
//! a confirmation step to the UI. Control flows strictly forward; no stage
//! is retried and no state is re-entered once left.

use async_trait::async_trait;
use log::{debug, error, warn};
use std::sync::Arc;

use crate::identity::{FetchOptions, IdentityService};
use crate::models::{Identity, LoginResult, ProviderError};
use crate::navigation::{
    fetch_failed_destination, provider_error_destination, resolve_destination, Navigator,
    DEFAULT_DESTINATION, USER_FETCH_FAILED,
};
use crate::session::SessionStore;
use crate::telemetry::{SessionObserved, SessionObserver};

/// Redirect finalizer interface
///
/// Resolves the redirect-supplied URL fragment into either a [`LoginResult`]
/// or a [`ProviderError`], asynchronously and exactly once per page load.
/// The flow registers one continuation for each outcome and never retries.
#[async_trait]
pub trait RedirectFinalizer: Send + Sync {
    /// Finalize the redirect.
    ///
    /// # Errors
    ///
    /// Returns the provider-reported error when the identity provider failed
    /// the login before a token was obtained.
    async fn finish(&self) -> Result<LoginResult, ProviderError>;
}

/// States of a single login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for the finalized redirect data
    Pending,
    /// Token obtained, identity fetch in flight
    Resolving,
    /// Provider asserted a verified identity; completion runs immediately
    AutoConfirmed,
    /// Unverified identity; an explicit confirm or cancel is required
    AwaitingConfirmation,
    /// Session written and destination committed
    Completed,
    /// Confirmation abandoned; nothing was written
    Cancelled,
    /// Terminal failure; the browser was sent to the error route
    Failed,
}

/// The deferred confirm capability
///
/// Absent until identity resolution completes, so confirmation can never be
/// invoked before an identity exists.
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    /// The resolved identity, exposed for display
    pub identity: Identity,
    /// A different identity that already has an active session, exposed as
    /// an advisory only; it never blocks confirmation
    pub conflicting: Option<Identity>,
    token: String,
    ttl: u64,
    return_to: Option<String>,
}

/// Single-use login completion flow
pub struct LoginFlow {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    observer: Arc<dyn SessionObserver>,
    state: LoginState,
    pending: Option<PendingConfirmation>,
    committed: Option<String>,
}

impl LoginFlow {
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        Self {
            store,
            navigator,
            observer,
            state: LoginState::Pending,
            pending: None,
            committed: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> LoginState {
        self.state
    }

    /// The confirmation data for the UI, present only while an explicit
    /// confirm or cancel is awaited
    #[must_use]
    pub fn confirmation(&self) -> Option<&PendingConfirmation> {
        match self.state {
            LoginState::AwaitingConfirmation => self.pending.as_ref(),
            _ => None,
        }
    }

    /// Drive the flow through redirect finalization and identity resolution.
    ///
    /// Returns the state reached: [`LoginState::Completed`] when the provider
    /// asserted a verified identity, [`LoginState::AwaitingConfirmation`]
    /// when the UI must prompt, or [`LoginState::Failed`] after the browser
    /// has been sent to the error route.
    pub async fn run(
        &mut self,
        finalizer: &dyn RedirectFinalizer,
        identities: &dyn IdentityService,
    ) -> LoginState {
        if self.state != LoginState::Pending {
            warn!("login flow is single-use, ignoring run() in state {:?}", self.state);
            return self.state;
        }

        let result = match finalizer.finish().await {
            Ok(result) => result,
            Err(provider_error) => {
                let redirect = provider_error_destination(&provider_error);
                error!("login finalization failed: {provider_error}, redirecting to {redirect}");
                let code = provider_error.error.unwrap_or_default();
                self.fail(&redirect, code);
                return self.state;
            }
        };

        self.state = LoginState::Resolving;
        debug!("got token, fetching user");

        let options = FetchOptions::for_login_completion(&result.token);
        match identities.fetch_self(&options).await {
            Ok(identity) => self.classify(identity, result),
            Err(fetch_error) => {
                let redirect = fetch_failed_destination();
                error!("error fetching user: {fetch_error}, redirecting to {redirect}");
                self.fail(&redirect, USER_FETCH_FAILED.to_string());
            }
        }

        self.state
    }

    /// Classify the resolved identity: auto-complete when the provider
    /// asserted verification, otherwise hold for an explicit confirm.
    fn classify(&mut self, identity: Identity, result: LoginResult) {
        debug!("resolved user {}", identity.id);

        let conflicting = self
            .store
            .get_user()
            .filter(|current| current.id != identity.id);

        self.pending = Some(PendingConfirmation {
            identity,
            conflicting,
            token: result.token,
            ttl: result.ttl,
            return_to: result.return_to,
        });

        if result.verified {
            self.state = LoginState::AutoConfirmed;
            self.complete_login();
        } else {
            self.state = LoginState::AwaitingConfirmation;
        }
    }

    /// Activate the session and redirect to the originally requested
    /// destination.
    ///
    /// The session store is written at most once per attempt. Once the
    /// destination has been committed, calling this again re-issues the same
    /// redirect and performs no second write. Before an identity has been
    /// resolved the call is a no-op.
    pub fn complete_login(&mut self) {
        if let Some(destination) = &self.committed {
            self.navigator.replace_location(destination);
            return;
        }

        let Some(pending) = self.pending.take() else {
            warn!("complete_login invoked before identity resolution, ignoring");
            return;
        };

        self.store
            .set_user(&pending.identity, &pending.token, pending.ttl);

        let destination = resolve_destination(pending.return_to.as_deref());
        debug!("login complete, redirecting to {destination}");

        self.observer.session_observed(&SessionObserved::Activated {
            identity: pending.identity,
        });
        self.navigator.replace_location(&destination);

        self.committed = Some(destination);
        self.state = LoginState::Completed;
    }

    /// Abandon the confirmation step: discard the resolved identity without
    /// persisting it and return the browser to the application root.
    pub fn cancel_login(&mut self) {
        self.pending = None;
        self.navigator.replace_location(DEFAULT_DESTINATION);

        if !matches!(self.state, LoginState::Completed | LoginState::Failed) {
            self.state = LoginState::Cancelled;
        }
    }

    /// Error redirector: send the browser to the application's own error
    /// route, never an externally supplied URL.
    fn fail(&mut self, redirect: &str, error_code: String) {
        self.navigator.replace_location(redirect);
        self.observer
            .session_observed(&SessionObserved::Failed { error_code });
        self.state = LoginState::Failed;
    }
}
