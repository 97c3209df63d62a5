use super::*;
use crate::auth::types::test_helpers::{self, GOOD_PASSWORD, MockProvider};
use crate::auth::types::Session;

use std::sync::atomic::Ordering;

use tokio::sync::Notify;

const TIMEOUT: Duration = Duration::from_secs(5);

fn store_with(provider: &Arc<MockProvider>) -> SessionStore {
    SessionStore::new(provider.clone(), TIMEOUT)
}

// =========================================================================
// GatedProvider — parks sign-in until the test releases it
// =========================================================================

struct GatedProvider {
    entered: Notify,
    release: Notify,
}

#[async_trait::async_trait]
impl IdentityProvider for GatedProvider {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(None)
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
        self.entered.notify_one();
        self.release.notified().await;
        Err(AuthError::InvalidCredentials { status: 400, message: "Invalid login credentials".into() })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

// =========================================================================
// get_session
// =========================================================================

#[tokio::test]
async fn get_session_without_session_is_none() {
    let provider = Arc::new(MockProvider::signed_out());
    let store = store_with(&provider);

    assert!(store.get_session().await.unwrap().is_none());
    assert!(store.user().is_none());
}

#[tokio::test]
async fn get_session_caches_principal() {
    let provider = Arc::new(MockProvider::signed_in(Some("admin")));
    let store = store_with(&provider);

    let principal = store.get_session().await.unwrap().unwrap();
    assert!(principal.is_admin());
    assert_eq!(store.user(), Some(principal));
}

#[tokio::test]
async fn get_session_overwrites_cached_principal() {
    let provider = Arc::new(MockProvider::signed_in(Some("admin")));
    let store = store_with(&provider);
    store.get_session().await.unwrap();

    *provider.session.lock().unwrap() = None;
    assert!(store.get_session().await.unwrap().is_none());
    assert!(store.user().is_none());
}

#[tokio::test]
async fn get_session_failure_keeps_cached_principal() {
    let provider = Arc::new(MockProvider::signed_in(Some("admin")));
    let store = store_with(&provider);
    store.get_session().await.unwrap();

    provider.fail_get_session.store(true, Ordering::SeqCst);
    let err = store.get_session().await.unwrap_err();
    assert!(matches!(err, AuthError::Unreachable(_)));
    assert!(store.user().is_some());
}

#[tokio::test]
async fn subscribers_see_principal_changes() {
    let provider = Arc::new(MockProvider::signed_in(Some("admin")));
    let store = store_with(&provider);
    let mut rx = store.subscribe();

    store.get_session().await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_some());

    store.logout().await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_none());
}

// =========================================================================
// login
// =========================================================================

#[tokio::test]
async fn login_rejected_raises_authentication_error_and_clears_busy() {
    let provider = Arc::new(MockProvider::signed_out());
    let store = store_with(&provider);

    let err = store.login("a@b.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials { status: 400, .. }));
    assert!(err.is_authentication_failure());
    assert!(!store.is_busy());
}

#[tokio::test]
async fn login_success_clears_busy_and_leaves_principal_unset() {
    let provider = Arc::new(MockProvider::signed_out());
    let store = store_with(&provider);

    store.login("admin@qwixkart.com", GOOD_PASSWORD).await.unwrap();
    assert!(!store.is_busy());
    assert!(store.user().is_none());

    let principal = store.get_session().await.unwrap().unwrap();
    assert!(principal.is_admin());
}

#[tokio::test]
async fn login_sets_busy_while_in_flight() {
    let provider = Arc::new(GatedProvider { entered: Notify::new(), release: Notify::new() });
    let store = Arc::new(SessionStore::new(provider.clone(), TIMEOUT));
    let mut busy = store.subscribe_busy();
    assert!(!*busy.borrow_and_update());

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.login("a@b.com", "wrong").await }
    });

    provider.entered.notified().await;
    assert!(store.is_busy());
    assert!(busy.has_changed().unwrap());
    assert!(*busy.borrow_and_update());

    provider.release.notify_one();
    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials { .. }));
    assert!(!store.is_busy());
    assert!(!*busy.borrow_and_update());
}

#[tokio::test]
async fn concurrent_login_is_rejected_without_touching_busy() {
    let provider = Arc::new(GatedProvider { entered: Notify::new(), release: Notify::new() });
    let store = Arc::new(SessionStore::new(provider.clone(), TIMEOUT));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.login("a@b.com", "pw").await }
    });
    provider.entered.notified().await;

    let second = store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(second, AuthError::LoginInProgress));
    assert!(store.is_busy(), "rejected login must not clear the in-flight flag");

    // The first login is still running, so every further attempt bounces too.
    let third = store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(third, AuthError::LoginInProgress));
    assert!(store.is_busy());

    provider.release.notify_one();
    first.await.unwrap().unwrap_err();
    assert!(!store.is_busy());
}

#[tokio::test]
async fn login_times_out_and_clears_busy() {
    let provider = Arc::new(MockProvider::signed_out().with_delay(Duration::from_secs(10)));
    let store = SessionStore::new(provider.clone(), Duration::from_millis(50));

    let err = store.login("a@b.com", GOOD_PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::Timeout { operation: "login", millis: 50 }));
    assert_eq!(err.to_string(), "login timed out after 50ms");
    assert!(!store.is_busy());
}

#[tokio::test]
async fn busy_flag_does_not_stick_across_logins() {
    let provider = Arc::new(MockProvider::signed_out());
    let store = store_with(&provider);

    store.login("a@b.com", "wrong").await.unwrap_err();
    store.login("a@b.com", GOOD_PASSWORD).await.unwrap();
    assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 2);
    assert!(!store.is_busy());
}

// =========================================================================
// logout
// =========================================================================

#[tokio::test]
async fn logout_clears_principal() {
    let provider = Arc::new(MockProvider::signed_in(Some("admin")));
    let store = store_with(&provider);
    store.get_session().await.unwrap();

    store.logout().await.unwrap();
    assert_eq!(provider.sign_outs(), 1);
    assert!(store.user().is_none());
}

#[tokio::test]
async fn logout_clears_principal_even_when_provider_fails() {
    let provider = Arc::new(MockProvider::signed_in(Some("admin")));
    provider.fail_sign_out.store(true, Ordering::SeqCst);
    let store = store_with(&provider);
    store.get_session().await.unwrap();

    let err = store.logout().await.unwrap_err();
    assert!(matches!(err, AuthError::ApiResponse { status: 500, .. }));
    assert!(store.user().is_none());
}

#[tokio::test]
async fn logout_timeout_still_clears_principal() {
    let slow = Arc::new(MockProvider::signed_in(Some("admin")).with_delay(Duration::from_secs(10)));
    let slow_store = SessionStore::new(slow, Duration::from_millis(50));
    slow_store.user.send_replace(Some(test_helpers::principal(Some("admin"))));

    let err = slow_store.logout().await.unwrap_err();
    assert!(matches!(err, AuthError::Timeout { operation: "logout", .. }));
    assert!(slow_store.user().is_none());
}
