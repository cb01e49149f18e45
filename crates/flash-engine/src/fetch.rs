//! Text fetching behind a trait seam so tests can script responses.

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use thiserror::Error;
use url::Url;

/// Errors produced while fetching documents or bit definitions.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// The requested location.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// The candidate could not be resolved to an absolute URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Every candidate in the source chain was rejected.
    #[error("no source answered for '{name}'")]
    Exhausted {
        /// The bit or document name that was being resolved.
        name: String,
    },
}

/// Fetches text resources. Implementations must be usable from concurrent
/// bit-population tasks.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the text at `url`, fresh (no conditional caching).
    async fn fetch_text(&self, url: &Url) -> Result<String, FetchError>;
}

/// Resolve a candidate location: absolute URLs pass through, anything else
/// is joined against the page location.
pub fn resolve_url(location: &Url, candidate: &str) -> Result<Url, url::ParseError> {
    Url::parse(candidate).or_else(|_| location.join(candidate))
}

/// HTTP fetcher over reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
