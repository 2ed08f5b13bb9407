#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

//! Client-side completion of OAuth2 implicit-flow logins.
//!
//! After an identity provider redirects back to the application with a token
//! (or an error) in the URL fragment, this crate takes over: it consumes the
//! finalized redirect data, resolves the token to a concrete user identity,
//! decides whether the session can be activated automatically or needs human
//! confirmation, and issues a safety-checked redirect to the originally
//! requested destination. The surrounding application supplies the external
//! collaborators (redirect finalizer, identity fetch, session store,
//! navigation, telemetry) through the traits re-exported below.

/// Version of the loginflow crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod flow;
pub mod identity;
pub mod models;
pub mod navigation;
pub mod session;
pub mod settings;
pub mod telemetry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use flow::{LoginFlow, LoginState, PendingConfirmation, RedirectFinalizer};
pub use identity::{FetchOptions, HttpIdentityService, IdentityError, IdentityService};
pub use models::{Identity, LoginResult, ProviderError};
pub use navigation::Navigator;
pub use session::{MemorySessionStore, SessionStore, StoredSession};
pub use settings::LoginflowSettings;
pub use telemetry::{NoopObserver, SessionObserved, SessionObserver};
