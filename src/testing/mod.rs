//! Testing utilities for loginflow
//!
//! Fixtures and mock collaborators for exercising the login completion flow
//! in isolation. Compiled for unit tests and, with the `testing` feature,
//! for integration tests.
//!
//! - [`fixtures`] - Pre-built test data (identities, login results, errors)
//! - [`mock`] - Mock and recording implementations of the collaborator traits

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::{
    MockIdentityService, MockRedirectFinalizer, RecordingNavigator, RecordingObserver,
};
