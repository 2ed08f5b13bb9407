//! Fire-and-forget session telemetry
//!
//! The session activator and the error redirector both publish a "session
//! observed" event so orthogonal concerns (support-chat widget
//! initialization, analytics) can react without being part of the core state
//! machine. Publishing never fails and never blocks the flow.

use crate::models::Identity;

/// Event published once per login attempt outcome
#[derive(Debug, Clone)]
pub enum SessionObserved {
    /// A session was activated for this identity
    Activated { identity: Identity },
    /// The attempt ended on the error route with this code
    Failed { error_code: String },
}

/// Consumer of session-observed events
pub trait SessionObserver: Send + Sync {
    fn session_observed(&self, event: &SessionObserved);
}

/// Observer that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn session_observed(&self, _event: &SessionObserved) {}
}
