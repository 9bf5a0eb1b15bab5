use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start, reported by the health check.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const API_PREFIX: &str = "/api/v1";
