//! Integration tests for the login completion flow
//!
//! Run with: cargo test --features testing

use std::sync::Arc;

use loginflow::testing::{
    MockIdentityService, MockRedirectFinalizer, RecordingNavigator, RecordingObserver,
    TestFixtures,
};
use loginflow::{
    IdentityError, LoginFlow, LoginState, MemorySessionStore, Navigator, ProviderError,
    SessionObserver, SessionStore,
};

struct Scenario {
    store: Arc<MemorySessionStore>,
    navigator: Arc<RecordingNavigator>,
    flow: LoginFlow,
}

fn scenario() -> Scenario {
    let store = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let observer = Arc::new(RecordingObserver::new());
    let flow = LoginFlow::new(
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        observer as Arc<dyn SessionObserver>,
    );
    Scenario {
        store,
        navigator,
        flow,
    }
}

#[tokio::test]
async fn verified_login_with_hostile_return_to_lands_on_root() {
    // LoginResult{token:"abc", returnTo:"//attacker.test/", verified:true}
    let mut s = scenario();
    let finalizer = MockRedirectFinalizer::success(TestFixtures::login_result(
        true,
        Some("//attacker.test/"),
    ));
    let identities = MockIdentityService::succeeding(TestFixtures::identity());

    let state = s.flow.run(&finalizer, &identities).await;

    assert_eq!(state, LoginState::Completed);
    assert_eq!(s.store.current_session().unwrap().token, "abc");
    assert_eq!(s.navigator.last().as_deref(), Some("./"));
}

#[tokio::test]
async fn unverified_login_confirmed_by_user_lands_on_requested_path() {
    // LoginResult{token:"abc", returnTo:"/dash", verified:false}, user confirms
    let mut s = scenario();
    let finalizer =
        MockRedirectFinalizer::success(TestFixtures::login_result(false, Some("/dash")));
    let identities = MockIdentityService::succeeding(TestFixtures::identity());

    let state = s.flow.run(&finalizer, &identities).await;
    assert_eq!(state, LoginState::AwaitingConfirmation);
    assert!(s.store.current_session().is_none());

    s.flow.complete_login();

    assert_eq!(s.flow.state(), LoginState::Completed);
    assert_eq!(s.store.current_session().unwrap().token, "abc");
    assert_eq!(s.navigator.last().as_deref(), Some("/dash"));
}

#[tokio::test]
async fn open_redirect_property_holds_for_every_scheme() {
    for hostile in [
        "http://evil.example/x",
        "https://evil.example/x",
        "javascript:alert(1)",
        "//evil.example/x",
    ] {
        let mut s = scenario();
        let finalizer =
            MockRedirectFinalizer::success(TestFixtures::login_result(true, Some(hostile)));
        let identities = MockIdentityService::succeeding(TestFixtures::identity());

        s.flow.run(&finalizer, &identities).await;

        assert_eq!(
            s.navigator.last().as_deref(),
            Some("./"),
            "hostile target: {hostile}"
        );
    }
}

#[tokio::test]
async fn provider_error_surfaces_on_error_route() {
    let mut s = scenario();
    let finalizer = MockRedirectFinalizer::failure(ProviderError {
        error: Some("access_denied".to_string()),
        error_description: None,
        error_uri: None,
    });
    let identities = MockIdentityService::succeeding(TestFixtures::identity());

    let state = s.flow.run(&finalizer, &identities).await;

    assert_eq!(state, LoginState::Failed);
    assert_eq!(
        s.navigator.last().as_deref(),
        Some("error?error=access_denied&error_description=&error_uri=")
    );
    assert!(s.store.current_session().is_none());
}

#[tokio::test]
async fn fetch_failure_surfaces_as_user_fetch_failed() {
    let mut s = scenario();
    let finalizer = MockRedirectFinalizer::success(TestFixtures::login_result(true, None));
    let identities = MockIdentityService::failing(IdentityError::Status(503));

    let state = s.flow.run(&finalizer, &identities).await;

    assert_eq!(state, LoginState::Failed);
    assert_eq!(
        s.navigator.last().as_deref(),
        Some("error?error=user_fetch_failed")
    );
    assert!(s.store.current_session().is_none());
}
