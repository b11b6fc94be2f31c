//! Check definition methods for httpcheck.

use super::types::{CheckDefinition, CheckSet};
use crate::error::InputError;
use crate::{DEFAULT_METHOD, DEFAULT_PROTOCOL};

impl CheckDefinition {
    /// Effective protocol list: `["http"]` when none are configured.
    ///
    /// Pure and idempotent; the stored definition is never touched, so
    /// repeated application cannot duplicate entries.
    pub fn effective_protocols(&self) -> Vec<String> {
        if self.protocols.is_empty() {
            vec![DEFAULT_PROTOCOL.to_string()]
        } else {
            self.protocols.clone()
        }
    }

    /// Effective HTTP method: GET when none is configured, upper-cased
    /// otherwise.
    pub fn effective_method(&self) -> String {
        if self.method.is_empty() {
            DEFAULT_METHOD.to_string()
        } else {
            self.method.to_uppercase()
        }
    }

    /// Derive a copy carrying a host override, leaving `self` unchanged.
    pub fn with_ip(&self, ip: &str) -> Self {
        Self { ip: ip.to_string(), ..self.clone() }
    }
}

/// Parse a check set from raw YAML bytes.
///
/// The payload is a mapping from check name to definition. A malformed
/// payload is an input failure; callers treat it as fatal.
pub fn from_yaml(data: &[u8]) -> Result<CheckSet, InputError> {
    Ok(serde_yaml::from_slice(data)?)
}
