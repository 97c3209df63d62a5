//! Supabase Auth (GoTrue) REST client.
//!
//! Thin HTTP wrapper for `/auth/v1/token` and `/auth/v1/logout`. The client
//! keeps the current session in memory the way the JS SDK keeps it in its
//! storage, and renews it with the refresh token shortly before expiry.
//! Response parsing lives in pure functions for testability.
//!
//! TRADE-OFFS
//! ==========
//! The stored session sits behind a `Mutex` held across the refresh call, so
//! concurrent `get_session` calls never spend the same refresh token twice.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use super::types::{AuthError, IdentityProvider, Session};
use crate::config::AdminConfig;

const TOKEN_PATH: &str = "/auth/v1/token";
const LOGOUT_PATH: &str = "/auth/v1/logout";
/// Refresh this many seconds before the access token actually expires.
const REFRESH_MARGIN_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    stored: Mutex<Option<Session>>,
}

impl SupabaseAuth {
    /// Build a client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &AdminConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.supabase_url.clone(),
            anon_key: config.anon_key.clone(),
            stored: Mutex::new(None),
        })
    }

    #[cfg(test)]
    pub(crate) async fn restore(&self, session: Session) {
        *self.stored.lock().await = Some(session);
    }

    async fn grant(&self, grant_type: &str, body: &serde_json::Value) -> Result<Session, AuthError> {
        tracing::debug!(grant_type, "requesting token");
        let response = self
            .http
            .post(format!("{}{TOKEN_PATH}", self.base_url))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(map_grant_error(status, &text));
        }

        parse_session(&text, now_secs())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let mut stored = self.stored.lock().await;
        let Some(current) = stored.as_ref() else {
            return Ok(None);
        };
        if !current.expires_within(now_secs(), REFRESH_MARGIN_SECS) {
            return Ok(Some(current.clone()));
        }

        let body = serde_json::json!({ "refresh_token": current.refresh_token });
        match self.grant("refresh_token", &body).await {
            Ok(renewed) => {
                tracing::debug!(user_id = %renewed.user.id, "session refreshed");
                *stored = Some(renewed.clone());
                Ok(Some(renewed))
            }
            Err(AuthError::InvalidCredentials { message, .. }) => {
                tracing::warn!(%message, "refresh token rejected; dropping stored session");
                *stored = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let session = self.grant("password", &body).await?;
        *self.stored.lock().await = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut stored = self.stored.lock().await;
        let Some(access_token) = stored.as_ref().map(|s| s.access_token.clone()) else {
            return Ok(());
        };

        let response = self
            .http
            .post(format!("{}{LOGOUT_PATH}", self.base_url))
            .query(&[("scope", "global")])
            .header("apikey", &self.anon_key)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        if !signed_out(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiResponse { status, body });
        }

        *stored = None;
        Ok(())
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Logout succeeded, or the token was already unknown to the server.
fn signed_out(status: u16) -> bool {
    (200..300).contains(&status) || matches!(status, 401 | 403 | 404)
}

fn parse_session(json: &str, now: u64) -> Result<Session, AuthError> {
    let mut session: Session = serde_json::from_str(json).map_err(|e| AuthError::ApiParse(e.to_string()))?;
    if session.expires_at.is_none() {
        session.expires_at = Some(now.saturating_add(session.expires_in));
    }
    Ok(session)
}

fn map_grant_error(status: u16, body: &str) -> AuthError {
    match status {
        400 | 401 | 422 => AuthError::InvalidCredentials { status, message: error_message(body) },
        _ => AuthError::ApiResponse { status, body: body.to_owned() },
    }
}

/// Pull the human-readable message out of a GoTrue error body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        ["error_description", "msg", "message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(serde_json::Value::as_str))
    });
    match from_json {
        Some(message) => message.to_owned(),
        None if body.trim().is_empty() => "unknown error".to_owned(),
        None => body.trim().to_owned(),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
