//! Sources of the raw check-set payload.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Produces the raw bytes the check set is decoded from.
#[async_trait::async_trait]
pub trait ConfigProvider {
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Reads the payload from a local file.
pub struct FileProvider {
    path: String,
}

impl FileProvider {
    pub fn new(path: &str) -> Self {
        Self { path: path.to_string() }
    }
}

#[async_trait::async_trait]
impl ConfigProvider for FileProvider {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read config file {}", self.path))
    }
}

/// Fetches the payload from a Consul key-value endpoint.
///
/// Consul answers with a JSON array; the first element's `Value` field
/// holds the base64-encoded check-set payload.
pub struct ConsulProvider {
    url: String,
    client: reqwest::Client,
}

impl ConsulProvider {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string(), client: reqwest::Client::new() }
    }
}

#[async_trait::async_trait]
impl ConfigProvider for ConsulProvider {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("consul request to {} failed", self.url))?
            .bytes()
            .await
            .context("failed to read consul response")?;
        decode_consul_payload(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ConsulEntry {
    #[serde(rename = "Value")]
    value: String,
}

/// Extract the embedded check-set bytes from a Consul KV response.
fn decode_consul_payload(body: &[u8]) -> Result<Vec<u8>> {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    let entries: Vec<ConsulEntry> =
        serde_json::from_slice(body).context("unexpected consul response shape")?;
    let Some(entry) = entries.first() else {
        bail!("consul response contained no entries");
    };
    STANDARD.decode(&entry.value).context("consul value is not valid base64")
}
