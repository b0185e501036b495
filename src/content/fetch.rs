//! Data-source protocol client.
//!
//! The source is an index resource (`index.json`) enumerating article
//! summaries, plus per-article resources addressed by filename (also
//! reachable as `article-{id}.json`). Every failure mode here — network
//! error, non-success status, malformed payload — is recoverable by the
//! store's fallback path and is never surfaced past it.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{Article, ArticleIndex};

/// Per-request budget. The data source serves small JSON documents; anything
/// slower than this is treated as unreachable.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the timeout budget
    #[error("Request timed out")]
    Timeout,
    /// Payload was not the expected JSON shape; treated like any other
    /// fetch failure for recovery purposes
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fetches and decodes one JSON resource.
async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    let response = tokio::time::timeout(REQUEST_TIMEOUT, client.get(url).send())
        .await
        .map_err(|_| FetchError::Timeout)?
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let body = response.text().await.map_err(FetchError::Network)?;
    Ok(serde_json::from_str(&body)?)
}

/// Fetches the article index from `{base}/index.json`.
pub async fn fetch_index(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<ArticleIndex, FetchError> {
    let url = format!("{}/index.json", base_url.trim_end_matches('/'));
    get_json(client, &url).await
}

/// Fetches one full article resource by filename.
pub async fn fetch_article(
    client: &reqwest::Client,
    base_url: &str,
    filename: &str,
) -> Result<Article, FetchError> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), filename);
    get_json(client, &url).await
}

/// Fetches one full article by id via the `article-{id}.json` address.
pub async fn fetch_article_by_id(
    client: &reqwest::Client,
    base_url: &str,
    id: u32,
) -> Result<Article, FetchError> {
    fetch_article(client, base_url, &format!("article-{id}.json")).await
}
