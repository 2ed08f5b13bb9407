//! Session store interface and in-memory reference implementation
//!
//! The session store is the persistent record of which identity is currently
//! authenticated. It is the only shared mutable resource the flow touches:
//! read once for conflict detection, written at most once per login attempt
//! from the session activator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::models::Identity;

/// The record written on session activation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub identity: Identity,
    pub token: String,
    /// Opaque session lifetime hint, stored unmodified
    pub ttl: u64,
    pub authenticated_at: DateTime<Utc>,
}

/// Session store interface
pub trait SessionStore: Send + Sync {
    /// Switch the active user identity. This is the single authoritative
    /// point where the logged-in user changes.
    fn set_user(&self, identity: &Identity, token: &str, ttl: u64);

    /// Read the currently active identity, used only for conflict detection.
    fn get_user(&self) -> Option<Identity>;
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<StoredSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full stored record, including the token and ttl
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn current_session(&self) -> Option<StoredSession> {
        self.current.read().unwrap().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn set_user(&self, identity: &Identity, token: &str, ttl: u64) {
        let session = StoredSession {
            identity: identity.clone(),
            token: token.to_string(),
            ttl,
            authenticated_at: Utc::now(),
        };
        *self.current.write().unwrap() = Some(session);
    }

    fn get_user(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap()
            .as_ref()
            .map(|session| session.identity.clone())
    }
}
