use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable outcome record for one check/protocol/domain triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Host override the check ran with; may be empty.
    pub ip: String,

    /// Composite identity: `name:protocol://domain+path`.
    pub key: String,

    /// When the result was produced.
    pub timestamp: DateTime<Utc>,

    /// Human-readable outcome: an error text or "All OK".
    pub message: String,

    /// Whether this result reports a failure.
    pub is_error: bool,
}

impl CheckResult {
    fn new(ip: &str, key: &str, message: String, is_error: bool) -> Self {
        Self {
            ip: ip.to_string(),
            key: key.to_string(),
            timestamp: Utc::now(),
            message,
            is_error,
        }
    }

    /// Record a passed check.
    pub fn ok(ip: &str, key: &str, message: impl Into<String>) -> Self {
        Self::new(ip, key, message.into(), false)
    }

    /// Record a failed check.
    pub fn error(ip: &str, key: &str, message: impl Into<String>) -> Self {
        Self::new(ip, key, message.into(), true)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.timestamp, self.key, self.message)
    }
}
