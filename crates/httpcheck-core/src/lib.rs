//! httpcheck-core - config-driven HTTP health check engine
//!
//! This library provides the check-definition model, per-check execution
//! and validation, concurrent dispatch across checks, and the result sink
//! abstraction. Loading raw configuration bytes and the concrete sink
//! implementations live in the application crate.

pub mod check;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod result;
pub mod sink;
pub mod validator;

// Re-export main types
pub use check::{Auth, CheckDefinition, CheckSet, ExpectedFormat};
pub use dispatcher::Dispatcher;
pub use error::{InputError, ProbeError, ValidationError};
pub use executor::Executor;
pub use result::CheckResult;
pub use sink::Sink;

/// Protocol used when a check configures none.
pub const DEFAULT_PROTOCOL: &str = "http";

/// HTTP method used when a check configures none.
pub const DEFAULT_METHOD: &str = "GET";
