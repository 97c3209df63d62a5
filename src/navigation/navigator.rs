//! Navigator — the host adapter that runs the guard before each transition.
//!
//! Each hop fetches a fresh session through the [`SessionStore`], evaluates
//! the guard, and either lands on a route or follows a redirect (re-running
//! the guard, as a router would). Session fetch and forced sign-out failures
//! propagate and block the navigation; nothing fails open.

use std::sync::Arc;

use super::guard::{self, NavigationDecision};
use super::routes::{self, AdminRoute, RouteMatch};
use crate::auth::{AuthError, SessionStore};

/// Upper bound on redirect hops for a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no route matches {0}")]
    NotFound(String),

    #[error("too many redirects while navigating to {0}")]
    RedirectLoop(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    pub route: AdminRoute,
    /// Normalized path the caller asked for.
    pub requested: String,
    /// `true` if the guard or the route table moved us elsewhere.
    pub redirected: bool,
}

pub struct Navigator {
    store: Arc<SessionStore>,
    current: Option<AdminRoute>,
}

impl Navigator {
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store, current: None }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Route the console is currently showing.
    #[must_use]
    pub fn current(&self) -> Option<&AdminRoute> {
        self.current.as_ref()
    }

    /// Navigate to `location`, applying the guard on every hop.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::Auth`] if fetching the session or the forced
    ///   sign-out fails.
    /// - [`NavigationError::NotFound`] if the guard lets us through to a path
    ///   the table does not know.
    /// - [`NavigationError::RedirectLoop`] after [`MAX_REDIRECTS`] hops.
    pub async fn navigate(&mut self, location: &str) -> Result<Landing, NavigationError> {
        let requested = routes::normalize(location);
        let mut path = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let principal = self.store.get_session().await?;

            match guard::evaluate(principal.as_ref(), &path) {
                NavigationDecision::Proceed => {}
                NavigationDecision::RedirectTo(to) => {
                    tracing::debug!(from = %path, %to, "guard redirect");
                    path = to.to_owned();
                    continue;
                }
                NavigationDecision::Deny { redirect_to } => {
                    let role = principal.as_ref().and_then(|p| p.role()).unwrap_or("<none>");
                    tracing::warn!(%role, %path, "non-admin session; signing out");
                    self.store.logout().await?;
                    path = redirect_to.to_owned();
                    continue;
                }
            }

            match routes::resolve(&path) {
                Some(RouteMatch::Page(route)) => {
                    let redirected = path != requested;
                    tracing::info!(route = %route, redirected, "navigated");
                    self.current = Some(route.clone());
                    return Ok(Landing { route, requested, redirected });
                }
                Some(RouteMatch::Alias(to)) => path = to.to_owned(),
                None => return Err(NavigationError::NotFound(path)),
            }
        }

        Err(NavigationError::RedirectLoop(requested))
    }
}

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;
