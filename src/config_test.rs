use super::*;

fn config(url: &str, key: &str, timeouts: AuthTimeouts) -> Result<AdminConfig, ConfigError> {
    AdminConfig::new(url.into(), key.into(), timeouts)
}

#[test]
fn new_trims_trailing_slash() {
    let cfg = config("https://project.supabase.co/", "anon", AuthTimeouts::default()).unwrap();
    assert_eq!(cfg.supabase_url, "https://project.supabase.co");
    assert_eq!(cfg.anon_key, "anon");
    assert_eq!(cfg.timeouts, AuthTimeouts { request_secs: 15, connect_secs: 5 });
}

#[test]
fn new_rejects_non_http_url() {
    let err = config("project.supabase.co", "anon", AuthTimeouts::default()).unwrap_err();
    assert!(err.to_string().contains("SUPABASE_URL"));
}

#[test]
fn new_blank_values_count_as_missing() {
    assert_eq!(
        config("  ", "anon", AuthTimeouts::default()).unwrap_err(),
        ConfigError::Missing { var: "SUPABASE_URL" }
    );
    assert_eq!(
        config("http://localhost:54321", "   ", AuthTimeouts::default()).unwrap_err(),
        ConfigError::Missing { var: "SUPABASE_ANON_KEY" }
    );
}

#[test]
fn new_rejects_zero_timeout() {
    let err = config("http://localhost:54321", "anon", AuthTimeouts { request_secs: 0, connect_secs: 5 }).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "AUTH_REQUEST_TIMEOUT_SECS", .. }));
}

#[test]
fn new_rejects_oversized_timeout() {
    let err = config("http://localhost:54321", "anon", AuthTimeouts { request_secs: u64::MAX, connect_secs: 5 })
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::Invalid { var: "AUTH_REQUEST_TIMEOUT_SECS", value: u64::MAX.to_string() }
    );

    let err = config(
        "http://localhost:54321",
        "anon",
        AuthTimeouts { request_secs: 15, connect_secs: MAX_AUTH_TIMEOUT_SECS + 1 },
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "AUTH_CONNECT_TIMEOUT_SECS", .. }));
}

#[test]
fn call_timeout_adds_a_second() {
    assert_eq!(AuthTimeouts::default().call_timeout(), Duration::from_secs(16));
}

#[test]
fn call_timeout_saturates_instead_of_overflowing() {
    let timeouts = AuthTimeouts { request_secs: u64::MAX, connect_secs: 5 };
    assert_eq!(timeouts.call_timeout(), Duration::from_secs(u64::MAX));
}
