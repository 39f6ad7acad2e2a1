//! HTTP fetcher implementation
//!
//! This module retrieves the HTML of a single page:
//! - Building the shared HTTP client with timeout and user agent
//! - Normalizing and validating the requested URL
//! - One GET per call, no retries
//! - Mapping every failure mode to a `FaviconError`

use crate::config::FetcherConfig;
use crate::favicon::FetchContext;
use crate::url::{is_valid, normalize};
use crate::FaviconError;
use reqwest::{Client, StatusCode};
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use favicon_scout::config::FetcherConfig;
/// use favicon_scout::favicon::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the HTML body of a page
///
/// The URL gets an `http://` scheme if it has none. The request races the
/// context: cancellation or the context deadline aborts it, as does the
/// client-level timeout, whichever comes first. The response is dropped on
/// every exit path, which releases its connection.
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | No http/https scheme after normalization | `InvalidUrl` |
/// | URL cannot be turned into a request | `RequestCreation` |
/// | DNS, connect, TLS, client timeout | `Network` |
/// | Context cancelled or past its deadline | `Cancelled` |
/// | Status other than 200 | `HttpStatus` |
/// | Body cannot be read to the end | `BodyRead` |
pub async fn fetch_html(
    client: &Client,
    ctx: &FetchContext,
    raw_url: &str,
) -> Result<String, FaviconError> {
    let url = normalize(raw_url);
    if !is_valid(&url) {
        return Err(FaviconError::InvalidUrl { url });
    }

    let request_url = Url::parse(&url).map_err(|e| FaviconError::RequestCreation {
        url: url.clone(),
        message: e.to_string(),
    })?;

    if ctx.is_cancelled() {
        return Err(FaviconError::Cancelled { url });
    }

    tokio::select! {
        result = send_and_read(client, request_url, &url) => result,
        _ = ctx.done() => {
            tracing::debug!("Fetch of {} aborted by request context", url);
            Err(FaviconError::Cancelled { url })
        }
    }
}

async fn send_and_read(client: &Client, request_url: Url, url: &str) -> Result<String, FaviconError> {
    let response = client
        .get(request_url)
        .send()
        .await
        .map_err(|source| FaviconError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FaviconError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FaviconError::BodyRead {
        url: url.to_string(),
        source,
    })
}
