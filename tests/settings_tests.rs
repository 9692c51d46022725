use std::time::Duration;

use portfolio_contact::settings::{AppConfig, AppEnvironment};

#[test]
fn defaults_are_valid_outside_production() {
    let config = AppConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.rate_limit_max_requests, 5);
    assert_eq!(config.rate_limit_window(), Duration::from_secs(3600));
    assert_eq!(config.mail_timeout(), Duration::from_secs(10));
    assert!(config.resend_api_key.is_none());
}

#[test]
fn wildcard_cors_is_rejected_in_production() {
    let config = AppConfig {
        env: AppEnvironment::Production,
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("Wildcard CORS"));
}

#[test]
fn zero_limits_and_bad_urls_are_rejected() {
    let config = AppConfig {
        rate_limit_max_requests: 0,
        resend_api_url: "not a url".to_string(),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("RATE_LIMIT_MAX_REQUESTS"));
    assert!(err.contains("RESEND_API_URL"));
}

#[test]
fn window_longer_than_thirty_days_is_rejected() {
    let config = AppConfig {
        rate_limit_window_secs: u64::MAX,
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("RATE_LIMIT_WINDOW_SECS must not exceed"));

    let month = AppConfig {
        rate_limit_window_secs: 30 * 24 * 60 * 60,
        ..AppConfig::default()
    };
    assert!(month.validate().is_ok());
}

#[test]
fn cors_origins_accept_comma_separated_values() {
    let config = AppConfig {
        cors_allowed_origins: vec!["https://a.dev, https://b.dev".to_string(), " ".to_string()],
        ..AppConfig::default()
    };

    assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
}

#[test]
fn debug_output_redacts_secrets() {
    let config = AppConfig {
        resend_api_key: Some("re_super_secret".to_string()),
        ..AppConfig::default()
    };

    let debug = format!("{:?}", config);
    assert!(!debug.contains("re_super_secret"));
    assert!(debug.contains("[REDACTED]"));
    assert!(debug.contains("[MISSING]"));
}
