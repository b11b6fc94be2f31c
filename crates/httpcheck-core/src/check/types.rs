//! Check definition types for httpcheck.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Expected well-formedness of the response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedFormat {
    #[default]
    None,
    Xml,
    Json,
    Yaml,
}

impl ExpectedFormat {
    /// Wire name of the format, also matched against the content-type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedFormat::None => "none",
            ExpectedFormat::Xml => "xml",
            ExpectedFormat::Json => "json",
            ExpectedFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExpectedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic-auth credentials for a check. Applied when the username is
/// non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Auth {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Declarative description of one named health check.
///
/// Every field defaults when absent from the configuration payload, so a
/// minimal check is just a list of domains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckDefinition {
    /// Overrides the request `Host` header when non-empty. May itself be
    /// replaced by a global override at dispatch time.
    pub ip: String,

    /// Protocols to probe; empty means plain `http`.
    pub protocols: Vec<String>,

    /// Domains to probe, each combined with every protocol.
    pub domains: Vec<String>,

    pub auth: Auth,

    /// Headers applied verbatim to the outgoing request.
    pub headers: HashMap<String, String>,

    /// Appended to `protocol://domain` as-is.
    pub path: String,

    /// HTTP method; empty means GET. Normalized to upper case.
    pub method: String,

    /// Declared for config compatibility; request construction performs no
    /// parameter encoding.
    pub params: HashMap<String, String>,

    /// Expected body format; triggers a parse check and a content-type
    /// check when set.
    pub format: ExpectedFormat,

    /// Expected exact response body; empty means not checked.
    pub response: String,

    /// Expected status code; 0 means not checked.
    pub status: u16,
}

/// Immutable collection of named check definitions for one run.
pub type CheckSet = HashMap<String, CheckDefinition>;
