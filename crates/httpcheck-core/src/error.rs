use thiserror::Error;

use crate::check::ExpectedFormat;

/// Failure to decode the check set. Fatal: nothing can run without it.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to decode check set: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Failure that ends one (check, protocol, domain) probe before
/// validation. Surfaces as a single error result for the triple.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Request could not be constructed or sent.
    #[error("request failed: {0}")]
    Transport(String),
    /// Response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(String),
}

/// One failed expectation for a (check, protocol, domain) triple.
///
/// Expectations are evaluated independently; a single response may
/// produce several of these. The `Display` text is the result message.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("response body is not well-formed {format}: {message}")]
    FormatParse { format: ExpectedFormat, message: String },
    #[error("config format = {expected} and returned content_type = {observed} are not equal")]
    ContentTypeMismatch { expected: ExpectedFormat, observed: String },
    #[error("config status_code = {expected} and returned status_code = {observed} are not equal")]
    StatusMismatch { expected: u16, observed: u16 },
    #[error("config response = {expected} and returned response = {observed} are not equal")]
    BodyMismatch { expected: String, observed: String },
}
