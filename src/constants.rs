use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start, reported by `/health`.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const CONTACT_PATH: &str = "/api/contact";
pub const HEALTH_PATH: &str = "/health";
