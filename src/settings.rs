use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

use crate::limiter::rate_limiter::MAX_WINDOW;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Whether `X-Forwarded-For` / `X-Real-IP` identify the caller.
    #[serde(default = "default_true")]
    pub trust_forwarded_headers: bool,

    #[serde(default)]
    pub resend_api_key: Option<String>,

    #[serde(default)]
    pub receiving_email: Option<String>,

    #[serde(default = "default_resend_api_url")]
    pub resend_api_url: String,

    #[serde(default = "default_notification_from")]
    pub notification_from: String,

    #[serde(default = "default_auto_reply_from")]
    pub auto_reply_from: String,

    #[serde(default = "default_owner_name")]
    pub owner_name: String,

    #[serde(default = "default_owner_title")]
    pub owner_title: String,

    #[serde(default = "default_linkedin_url")]
    pub linkedin_url: String,

    #[serde(default = "default_github_url")]
    pub github_url: String,

    #[serde(default = "default_mail_timeout")]
    pub mail_timeout_secs: u64,

    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max_requests: u32,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,

    #[serde(default = "default_sweep_interval")]
    pub rate_limit_sweep_interval_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Contact".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_true() -> bool {
    true
}
fn default_resend_api_url() -> String {
    "https://api.resend.com".to_string()
}
fn default_notification_from() -> String {
    "Portfolio Contact <onboarding@resend.dev>".to_string()
}
fn default_auto_reply_from() -> String {
    "Mohmed Shoban Shaikh <onboarding@resend.dev>".to_string()
}
fn default_owner_name() -> String {
    "Mohmed Shoban Shaikh".to_string()
}
fn default_owner_title() -> String {
    "Software Developer".to_string()
}
fn default_linkedin_url() -> String {
    "https://linkedin.com/in/your-profile".to_string()
}
fn default_github_url() -> String {
    "https://github.com/shobanshaikh27".to_string()
}
fn default_mail_timeout() -> u64 {
    10
}
fn default_rate_limit_max() -> u32 {
    5
}
fn default_rate_limit_window() -> u64 {
    60 * 60
}
fn default_sweep_interval() -> u64 {
    5 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            trust_forwarded_headers: default_true(),
            resend_api_key: None,
            receiving_email: None,
            resend_api_url: default_resend_api_url(),
            notification_from: default_notification_from(),
            auto_reply_from: default_auto_reply_from(),
            owner_name: default_owner_name(),
            owner_title: default_owner_title(),
            linkedin_url: default_linkedin_url(),
            github_url: default_github_url(),
            mail_timeout_secs: default_mail_timeout(),
            rate_limit_max_requests: default_rate_limit_max(),
            rate_limit_window_secs: default_rate_limit_window(),
            rate_limit_sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Unprefixed names are what the Resend docs and most hosts use
        config.resend_api_key = config.resend_api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env_opt("RESEND_API_KEY"));
        config.receiving_email = config.receiving_email
            .filter(|addr| !addr.trim().is_empty())
            .or_else(|| env_opt("RECEIVING_EMAIL"));

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if Url::parse(&self.resend_api_url).is_err() {
            errors.push("RESEND_API_URL must be a valid URL");
        }
        if self.rate_limit_max_requests == 0 {
            errors.push("RATE_LIMIT_MAX_REQUESTS must be greater than zero");
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be greater than zero");
        }
        if self.rate_limit_window_secs > MAX_WINDOW.as_secs() {
            errors.push("RATE_LIMIT_WINDOW_SECS must not exceed 30 days");
        }
        if self.mail_timeout_secs == 0 {
            errors.push("MAIL_TIMEOUT_SECS must be greater than zero");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit_sweep_interval_secs.max(1))
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self.as_deref() {
            None | Some("") => "[MISSING]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_forwarded_headers", &self.trust_forwarded_headers)
            .field("resend_api_key", &self.resend_api_key.redact())
            .field("receiving_email", &self.receiving_email.redact())
            .field("resend_api_url", &self.resend_api_url)
            .field("mail_timeout_secs", &self.mail_timeout_secs)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_sweep_interval_secs", &self.rate_limit_sweep_interval_secs)
            .finish()
    }
}
