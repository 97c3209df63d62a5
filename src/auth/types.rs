//! Auth types: principal, session, errors, and the provider seam.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role claim value that grants access to the admin console.
pub const ADMIN_ROLE: &str = "admin";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity-provider operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The provider rejected the credentials. This is the authentication
    /// error surfaced to the login form.
    #[error("authentication failed ({status}): {message}")]
    InvalidCredentials { status: u16, message: String },

    /// The provider could not be reached.
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),

    /// The provider did not answer within the configured timeout.
    #[error("{operation} timed out after {millis}ms")]
    Timeout { operation: &'static str, millis: u64 },

    /// The provider returned a non-success HTTP status.
    #[error("identity provider error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("identity provider response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A login is already in flight on this store.
    #[error("a login request is already in progress")]
    LoginInProgress,
}

impl AuthError {
    /// `true` for the failures a login form should show as "could not sign in".
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. } | Self::Unreachable(_) | Self::Timeout { .. })
    }
}

// =============================================================================
// PRINCIPAL / SESSION
// =============================================================================

/// Authenticated user as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    /// Provider-controlled metadata. Only `role` is interpreted here.
    #[serde(default)]
    pub app_metadata: serde_json::Map<String, serde_json::Value>,
}

impl Principal {
    /// The `app_metadata.role` claim, if present and a string.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.app_metadata.get("role").and_then(serde_json::Value::as_str)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Some(ADMIN_ROLE)
    }
}

/// Provider-issued session wrapping a [`Principal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: u64,
    /// Unix seconds. Filled from `expires_in` when the provider omits it.
    #[serde(default)]
    pub expires_at: Option<u64>,
    pub user: Principal,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl Session {
    /// `true` if the access token expires within `margin_secs` of `now`.
    #[must_use]
    pub fn expires_within(&self, now: u64, margin_secs: u64) -> bool {
        self.expires_at.is_some_and(|at| at <= now.saturating_add(margin_secs))
    }
}

// =============================================================================
// PROVIDER SEAM
// =============================================================================

/// External identity service used by the session store.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, or `None` when nobody is signed in.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Exchange email + password for a session.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Revoke the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
