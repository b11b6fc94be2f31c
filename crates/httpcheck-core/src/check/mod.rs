//! Check definitions for httpcheck.
//!
//! This module defines the declarative model of a health check and the
//! check set loaded from configuration.

mod methods;
mod types;

pub use methods::from_yaml;
pub use types::{Auth, CheckDefinition, CheckSet, ExpectedFormat};
