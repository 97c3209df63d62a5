//! Session store: the console's single source of truth for "who is logged in".
//!
//! ARCHITECTURE
//! ============
//! The store wraps an [`IdentityProvider`] and publishes the cached principal
//! and the busy flag through `tokio::sync::watch`, so UI layers can subscribe
//! instead of polling. One store is built at start-up and shared via `Arc`.
//!
//! TRADE-OFFS
//! ==========
//! - Every provider call is bounded by `call_timeout`; a hung network call
//!   surfaces as [`AuthError::Timeout`] instead of hanging the caller.
//! - A second `login` while one is in flight is rejected with
//!   [`AuthError::LoginInProgress`] rather than racing the first.
//! - Ordering between *different* operations (slow login vs. logout) is not
//!   coordinated.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::types::{AuthError, IdentityProvider, Principal};

pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    user: watch::Sender<Option<Principal>>,
    busy: watch::Sender<bool>,
    call_timeout: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, call_timeout: Duration) -> Self {
        Self {
            provider,
            user: watch::Sender::new(None),
            busy: watch::Sender::new(false),
            call_timeout,
        }
    }

    /// Last principal seen by [`Self::get_session`] (cleared by logout).
    #[must_use]
    pub fn user(&self) -> Option<Principal> {
        self.user.borrow().clone()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.user.subscribe()
    }

    #[must_use]
    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Fetch the current session from the provider and cache its principal.
    ///
    /// Absence of a session is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; the cached principal is left untouched.
    pub async fn get_session(&self) -> Result<Option<Principal>, AuthError> {
        let session = self.bounded("get_session", self.provider.get_session()).await?;
        let principal = session.map(|s| s.user);
        self.user.send_replace(principal.clone());
        Ok(principal)
    }

    /// Authenticate with email and password.
    ///
    /// Does not populate the principal; callers follow up with
    /// [`Self::get_session`] or the next guarded navigation.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] when the provider rejects the login.
    /// - [`AuthError::Unreachable`] / [`AuthError::Timeout`] when it can't be reached.
    /// - [`AuthError::LoginInProgress`] if another login is still running.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _busy = BusyGuard::acquire(&self.busy).ok_or(AuthError::LoginInProgress)?;
        tracing::info!(%email, "admin login requested");

        match self.bounded("login", self.provider.sign_in_with_password(email, password)).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "admin login succeeded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%email, error = %e, "admin login failed");
                Err(e)
            }
        }
    }

    /// Sign out with the provider, then clear the cached principal.
    ///
    /// The principal is cleared even when the provider call fails; the
    /// provider error is still returned.
    ///
    /// # Errors
    ///
    /// Propagates the provider's sign-out failure.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = self.bounded("logout", self.provider.sign_out()).await;
        self.user.send_replace(None);
        match &result {
            Ok(()) => tracing::info!("admin signed out"),
            Err(e) => tracing::warn!(error = %e, "provider sign-out failed; local session cleared"),
        }
        result
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AuthError>>,
    ) -> Result<T, AuthError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| AuthError::Timeout {
                operation,
                millis: u64::try_from(self.call_timeout.as_millis()).unwrap_or(u64::MAX),
            })?
    }
}

/// Holds the busy flag for the duration of a login; clears it on drop,
/// including when the login future is cancelled.
struct BusyGuard<'a> {
    busy: &'a watch::Sender<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a watch::Sender<bool>) -> Option<Self> {
        let acquired = busy.send_if_modified(|flag| {
            if *flag {
                false
            } else {
                *flag = true;
                true
            }
        });
        acquired.then(|| Self { busy })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.send_replace(false);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
