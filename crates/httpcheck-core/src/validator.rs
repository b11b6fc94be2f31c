//! Response validation for httpcheck.
//!
//! Pure comparison logic: takes the already-read response properties and
//! produces results, performing no I/O of its own.

use serde::de::IgnoredAny;

use crate::check::{CheckDefinition, ExpectedFormat};
use crate::error::ValidationError;
use crate::result::CheckResult;

/// Message emitted when a configured body check passes cleanly.
pub const MSG_SUCCESS: &str = "All OK";

/// Run the configured expectation checks over one response.
///
/// Each configured check is evaluated independently, so a single response
/// may yield several error results and a format failure never suppresses a
/// status failure. A success result is emitted only when a body check is
/// configured and no check failed.
pub fn validate(
    definition: &CheckDefinition,
    key: &str,
    status: u16,
    content_type: &str,
    body: &[u8],
) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let mut failed = false;

    if definition.format != ExpectedFormat::None {
        if !content_type.contains(definition.format.as_str()) {
            failed = true;
            let error = ValidationError::ContentTypeMismatch {
                expected: definition.format,
                observed: content_type.to_string(),
            };
            results.push(CheckResult::error(&definition.ip, key, error.to_string()));
        }
        if let Err(error) = parse_body(definition.format, body) {
            failed = true;
            results.push(CheckResult::error(&definition.ip, key, error.to_string()));
        }
    }

    if definition.status != 0 && status != definition.status {
        failed = true;
        let error =
            ValidationError::StatusMismatch { expected: definition.status, observed: status };
        results.push(CheckResult::error(&definition.ip, key, error.to_string()));
    }

    if !definition.response.is_empty() {
        if definition.response.as_bytes() != body {
            failed = true;
            let error = ValidationError::BodyMismatch {
                expected: definition.response.clone(),
                observed: String::from_utf8_lossy(body).into_owned(),
            };
            results.push(CheckResult::error(&definition.ip, key, error.to_string()));
        }
        if !failed {
            results.push(CheckResult::ok(&definition.ip, key, MSG_SUCCESS));
        }
    }

    results
}

/// Well-formedness probe: parse into an opaque value and discard it.
fn parse_body(format: ExpectedFormat, body: &[u8]) -> Result<(), ValidationError> {
    let outcome = match format {
        ExpectedFormat::None => Ok(()),
        ExpectedFormat::Json => {
            serde_json::from_slice::<IgnoredAny>(body).map(|_| ()).map_err(|e| e.to_string())
        }
        ExpectedFormat::Yaml => {
            serde_yaml::from_slice::<IgnoredAny>(body).map(|_| ()).map_err(|e| e.to_string())
        }
        ExpectedFormat::Xml => parse_xml(body),
    };
    outcome.map_err(|message| ValidationError::FormatParse { format, message })
}

fn parse_xml(body: &[u8]) -> Result<(), String> {
    let mut reader = quick_xml::Reader::from_reader(body);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(error) => return Err(error.to_string()),
        }
        buf.clear();
    }
}
