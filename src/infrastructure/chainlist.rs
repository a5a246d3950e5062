//! Fetch of the public chain-metadata document

use anyhow::{Context, Result};

use crate::domain::{ChainDescriptor, RawChain};

pub const CHAINLIST_URL: &str = "https://chainid.network/chains.json";

/// HTTP client for the one chain-document fetch of a session.
pub struct ChainlistClient {
    http: reqwest::Client,
    url: String,
}

impl ChainlistClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// GET the document and normalize every entry. Non-2xx status and
    /// decode failures both surface as errors; the caller treats either as
    /// the registry's terminal Error state.
    pub async fn fetch(&self) -> Result<Vec<ChainDescriptor>> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Failed to fetch chain data")?
            .error_for_status()
            .context("Chain data request was rejected")?;

        let raw: Vec<RawChain> = response
            .json()
            .await
            .context("Failed to decode chain data")?;

        Ok(normalize_chains(raw))
    }
}

pub fn normalize_chains(raw: Vec<RawChain>) -> Vec<ChainDescriptor> {
    raw.into_iter().map(ChainDescriptor::normalize).collect()
}

/// Parse a raw JSON document into normalized descriptors. Split out from
/// the HTTP path so tests can feed a fixture.
pub fn parse_chain_document(body: &str) -> Result<Vec<ChainDescriptor>> {
    let raw: Vec<RawChain> = serde_json::from_str(body).context("Failed to decode chain data")?;
    Ok(normalize_chains(raw))
}
