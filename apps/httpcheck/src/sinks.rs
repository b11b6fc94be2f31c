//! Concrete result sinks.

use anyhow::{Context, Result};
use httpcheck_core::{CheckResult, Sink};
use serde::Serialize;
use tracing::{info, warn};

/// Prints results to the local log.
pub struct LogSink;

#[async_trait::async_trait]
impl Sink for LogSink {
    async fn submit(&self, result: &CheckResult) -> Result<()> {
        if result.is_error {
            warn!("{result}");
        } else {
            info!("{result}");
        }
        Ok(())
    }
}

/// Number of occurrences Sensu waits for before alerting.
const SENSU_OCCURRENCES: u32 = 3;

/// One result as Sensu's results endpoint expects it.
#[derive(Debug, Serialize)]
struct SensuCheckResult {
    /// Source host the check ran against.
    source: String,
    /// Unique check name.
    name: String,
    /// Error text or "All OK".
    output: String,
    /// 0 when the check passed, 2 otherwise.
    status: u8,
    /// Check duration; not measured, always zero.
    duration: f64,
    occurrences: u32,
}

impl SensuCheckResult {
    fn from_result(result: &CheckResult) -> Self {
        Self {
            source: result.ip.clone(),
            name: result.key.clone(),
            output: result.message.clone(),
            status: if result.is_error { 2 } else { 0 },
            duration: 0.0,
            occurrences: SENSU_OCCURRENCES,
        }
    }
}

/// Submits results to a Sensu results endpoint.
pub struct SensuSink {
    url: String,
    client: reqwest::Client,
}

impl SensuSink {
    pub fn new(api: &str) -> Self {
        Self { url: format!("{api}/results"), client: reqwest::Client::new() }
    }
}

#[async_trait::async_trait]
impl Sink for SensuSink {
    async fn submit(&self, result: &CheckResult) -> Result<()> {
        self.client
            .post(&self.url)
            .json(&SensuCheckResult::from_result(result))
            .send()
            .await
            .with_context(|| format!("sensu submission to {} failed", self.url))?
            .error_for_status()
            .context("sensu rejected the result")?;
        Ok(())
    }
}
