//! Admin console configuration.
//!
//! Values arrive through the CLI (flags, or the matching env vars via clap)
//! and are validated here into a typed [`AdminConfig`].

use std::time::Duration;

pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_AUTH_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Longest timeout accepted for any auth call.
pub const MAX_AUTH_TIMEOUT_SECS: u64 = 3600;

/// Errors produced while validating configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value is blank.
    #[error("missing config: {var} not set")]
    Missing { var: &'static str },

    /// A value is set but cannot be used.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for AuthTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_AUTH_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_AUTH_CONNECT_TIMEOUT_SECS }
    }
}

impl AuthTimeouts {
    /// Outer bound for a whole provider call, one second above the HTTP
    /// client's own request timeout.
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.request_secs.saturating_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Project URL without trailing slash, e.g. `https://abc.supabase.co`.
    pub supabase_url: String,
    /// Public anon key sent as `apikey` on every auth request.
    pub anon_key: String,
    pub timeouts: AuthTimeouts,
}

impl AdminConfig {
    /// Build config from explicit values, normalizing the project URL.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] if the URL or anon key is blank.
    /// - [`ConfigError::Invalid`] if the URL is not http(s) or a timeout is
    ///   outside `1..=MAX_AUTH_TIMEOUT_SECS`.
    pub fn new(supabase_url: String, anon_key: String, timeouts: AuthTimeouts) -> Result<Self, ConfigError> {
        let supabase_url = supabase_url.trim().trim_end_matches('/').to_string();
        if supabase_url.is_empty() {
            return Err(ConfigError::Missing { var: "SUPABASE_URL" });
        }
        if !(supabase_url.starts_with("http://") || supabase_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: "SUPABASE_URL", value: supabase_url });
        }
        if anon_key.trim().is_empty() {
            return Err(ConfigError::Missing { var: "SUPABASE_ANON_KEY" });
        }
        check_timeout("AUTH_REQUEST_TIMEOUT_SECS", timeouts.request_secs)?;
        check_timeout("AUTH_CONNECT_TIMEOUT_SECS", timeouts.connect_secs)?;
        Ok(Self { supabase_url, anon_key, timeouts })
    }
}

fn check_timeout(var: &'static str, secs: u64) -> Result<(), ConfigError> {
    if (1..=MAX_AUTH_TIMEOUT_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { var, value: secs.to_string() })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
