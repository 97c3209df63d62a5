//! Navigation guard.
//!
//! Rules, first match wins:
//! 1. no session, target is not `/login`       -> redirect to `/login`
//! 2. session whose role claim is not `admin`  -> deny (sign out) and go to `/login`
//! 3. admin session, target is `/login`        -> redirect to `/dashboard`
//! 4. otherwise                                -> proceed
//!
//! Rule 2 runs before rule 3, so a non-admin landing on `/login` is signed
//! out instead of being bounced forward.

use super::routes::{DEFAULT_AUTHENTICATED_PATH, LOGIN_PATH};
use crate::auth::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    RedirectTo(&'static str),
    /// The session must be revoked before following `redirect_to`.
    Deny { redirect_to: &'static str },
}

/// Decide what to do with a transition to `target` (a normalized path).
#[must_use]
pub fn evaluate(session: Option<&Principal>, target: &str) -> NavigationDecision {
    let Some(principal) = session else {
        if target == LOGIN_PATH {
            return NavigationDecision::Proceed;
        }
        return NavigationDecision::RedirectTo(LOGIN_PATH);
    };

    if !principal.is_admin() {
        return NavigationDecision::Deny { redirect_to: LOGIN_PATH };
    }

    if target == LOGIN_PATH {
        return NavigationDecision::RedirectTo(DEFAULT_AUTHENTICATED_PATH);
    }

    NavigationDecision::Proceed
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
