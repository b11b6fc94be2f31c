//! Probe execution for httpcheck.

use reqwest::{Client, Method, Response, header};

use crate::check::CheckDefinition;
use crate::error::ProbeError;
use crate::result::CheckResult;
use crate::validator;

/// Request address for a protocol/domain pair: `protocol://domain` plus
/// the configured path, no further normalization.
pub fn request_address(protocol: &str, domain: &str, path: &str) -> String {
    format!("{protocol}://{domain}{path}")
}

/// Builds and sends one HTTP request per (check, protocol, domain)
/// combination and runs validation over the response.
pub struct Executor {
    client: Client,
    insecure_client: Client,
}

impl Executor {
    /// Build the shared HTTP clients.
    ///
    /// The client used for `https` accepts any certificate: checks are
    /// routinely pointed at a host ip whose name the certificate does not
    /// cover. Neither client carries a timeout, so a hung target stalls
    /// its own check and nothing else.
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        let insecure_client = Client::builder().danger_accept_invalid_certs(true).build()?;
        Ok(Self { client, insecure_client })
    }

    /// Probe one protocol/domain combination of a check.
    ///
    /// Transport and body-read failures end the probe with a single error
    /// result; otherwise the configured expectation checks run and their
    /// results are returned.
    pub async fn execute(
        &self,
        name: &str,
        definition: &CheckDefinition,
        protocol: &str,
        domain: &str,
    ) -> Vec<CheckResult> {
        let address = request_address(protocol, domain, &definition.path);
        let key = format!("{name}:{address}");

        let response = match self.send(definition, protocol, &address).await {
            Ok(response) => response,
            Err(error) => {
                return vec![CheckResult::error(&definition.ip, &key, error.to_string())];
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(error) => {
                let error = ProbeError::BodyRead(error.to_string());
                return vec![CheckResult::error(&definition.ip, &key, error.to_string())];
            }
        };

        validator::validate(definition, &key, status, &content_type, &body)
    }

    async fn send(
        &self,
        definition: &CheckDefinition,
        protocol: &str,
        address: &str,
    ) -> Result<Response, ProbeError> {
        let client =
            if protocol == "https" { &self.insecure_client } else { &self.client };

        let method = Method::from_bytes(definition.effective_method().as_bytes())
            .map_err(|error| ProbeError::Transport(error.to_string()))?;

        // Request body stays empty; `params` is not encoded.
        let mut request = client.request(method, address);
        if !definition.ip.is_empty() {
            request = request.header(header::HOST, definition.ip.as_str());
        }
        for (name, value) in &definition.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !definition.auth.username.is_empty() {
            request =
                request.basic_auth(&definition.auth.username, Some(&definition.auth.password));
        }

        request.send().await.map_err(|error| ProbeError::Transport(error.to_string()))
    }
}
