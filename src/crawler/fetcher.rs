//! HTTP fetcher implementation
//!
//! One GET per page, preceded by a fixed politeness delay. There is no
//! retry and no adaptive throttling: a failed fetch is permanently skipped
//! for the current crawl run. Non-2xx statuses and transport errors are
//! classified uniformly as fetch failures the caller recovers from by
//! skipping the page.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// The fetched document for one URL
///
/// Produced by the fetcher, consumed by extraction and link discovery,
/// then discarded; pages are not cached across the crawl.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub html: String,
}

/// A page-scoped fetch failure
///
/// Never fatal on its own; the coordinator reports it through the
/// progress sink and moves on. Only a failure on the seed URL escalates.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Builds the HTTP client used for the whole crawl
pub fn build_http_client(user_agent: &str, timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page, sleeping the fixed politeness delay first
///
/// The delay applies before every request, including the seed; it is a
/// constant, not adaptive. Timeouts come from the client configuration.
pub async fn fetch_page(client: &Client, url: &Url, delay: Duration) -> Result<Page, FetchError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    Ok(Page {
        url: url.clone(),
        html,
    })
}
