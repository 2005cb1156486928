//! Snapshot fetcher: one HTTP GET per cycle against the metrics endpoint.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::types::Snapshot;

pub const METRICS_PATH: &str = "/api/system";
pub const DEFAULT_URL: &str = "http://127.0.0.1:5000/api/system";

#[derive(Debug, Error)]
pub enum PollError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned {0}")]
    Status(StatusCode),
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid metrics url: {0}")]
    InvalidUrl(String),
}

impl PollError {
    /// True for failures to obtain a body (transport or HTTP status).
    pub fn is_fetch(&self) -> bool {
        matches!(self, PollError::Transport(_) | PollError::Status(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, PollError::Parse(_))
    }
}

/// Where snapshots come from. One call per cycle; implementations should not
/// retry, the scheduler's cadence does that.
#[allow(async_fn_in_trait)]
pub trait SnapshotSource {
    async fn fetch(&mut self) -> Result<Snapshot, PollError>;
}

/// Accept `http(s)://host:port` and fill in the metrics path when none is given.
pub fn endpoint_url(raw: &str) -> Result<Url, PollError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| PollError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PollError::InvalidUrl(format!(
            "{raw}: expected http:// or https://"
        )));
    }
    if url.path().is_empty() || url.path() == "/" {
        url.set_path(METRICS_PATH);
    }
    Ok(url)
}

pub fn parse_snapshot(body: &[u8]) -> Result<Snapshot, PollError> {
    Ok(serde_json::from_slice(body)?)
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: Url,
}

impl HttpFetcher {
    pub fn new(raw_url: &str) -> Result<Self, PollError> {
        let url = endpoint_url(raw_url)?;
        let client = Client::builder().build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl SnapshotSource for HttpFetcher {
    async fn fetch(&mut self) -> Result<Snapshot, PollError> {
        let resp = self.client.get(self.url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PollError::Status(status));
        }
        let body = resp.bytes().await?;
        parse_snapshot(&body)
    }
}
