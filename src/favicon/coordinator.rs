//! Per-URL pipeline and the concurrent batch fan-out
//!
//! Every URL of a batch runs on its own tokio task. Tasks report back over a
//! bounded channel sized to the batch, and the collector returns once every
//! sender is gone.

use crate::favicon::extractor::extract_favicon;
use crate::favicon::fetcher::fetch_html;
use crate::favicon::FetchContext;
use crate::url::{base_url, normalize};
use crate::FaviconError;
use reqwest::Client;
use serde::{Serialize, Serializer};
use tokio::sync::mpsc;

/// Outcome for one requested URL in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    /// The URL exactly as it was requested
    pub url: String,
    /// The resolved icon URL, empty on failure
    pub icon: String,
    /// Serialized as 1 or 0
    #[serde(serialize_with = "serialize_flag")]
    pub success: bool,
}

impl BatchEntry {
    pub fn success(url: String, icon: String) -> Self {
        Self {
            url,
            icon,
            success: true,
        }
    }

    pub fn failure(url: String) -> Self {
        Self {
            url,
            icon: String::new(),
            success: false,
        }
    }
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

/// Runs the single-URL pipeline: fetch, then extract
///
/// Root-relative icon links resolve against the base of the normalized URL.
/// The first failure is returned as is.
pub async fn find_favicon(
    client: &Client,
    ctx: &FetchContext,
    raw_url: &str,
) -> Result<String, FaviconError> {
    let html = fetch_html(client, ctx, raw_url).await?;
    let normalized = normalize(raw_url);
    extract_favicon(&html, base_url(&normalized))
}

/// Looks up the favicon of every URL concurrently
///
/// Exactly one entry comes back per input URL, duplicates included. Entries
/// are in completion order, not input order. Failures of any kind collapse
/// to `success: false`; the cause is only logged.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `ctx` - Cancellation and deadline shared by every unit of the batch
/// * `urls` - The requested URLs
pub async fn fan_out(client: &Client, ctx: &FetchContext, urls: Vec<String>) -> Vec<BatchEntry> {
    let total = urls.len();
    if total == 0 {
        return Vec::new();
    }

    let (tx, mut rx) = mpsc::channel(total);

    for url in urls {
        let reporter = EntryReporter::new(url, tx.clone());
        let client = client.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let entry = process_url(&client, &ctx, reporter.url()).await;
            reporter.report(entry);
        });
    }
    drop(tx);

    let mut entries = Vec::with_capacity(total);
    while let Some(entry) = rx.recv().await {
        entries.push(entry);
    }

    let succeeded = entries.iter().filter(|e| e.success).count();
    tracing::info!(
        "Batch finished: {} of {} favicons found",
        succeeded,
        entries.len()
    );

    entries
}

async fn process_url(client: &Client, ctx: &FetchContext, url: &str) -> BatchEntry {
    match find_favicon(client, ctx, url).await {
        Ok(icon) => {
            tracing::debug!("Favicon for {}: {}", url, icon);
            BatchEntry::success(url.to_string(), icon)
        }
        Err(e) => {
            tracing::warn!("Favicon lookup failed for {}: {}", url, e);
            BatchEntry::failure(url.to_string())
        }
    }
}

/// Sends one task's entry to the collector
///
/// If the task ends without reporting (panic, runtime shutdown), the drop
/// sends a failure entry instead, so the batch never comes back short.
struct EntryReporter {
    url: String,
    tx: Option<mpsc::Sender<BatchEntry>>,
}

impl EntryReporter {
    fn new(url: String, tx: mpsc::Sender<BatchEntry>) -> Self {
        Self { url, tx: Some(tx) }
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn report(mut self, entry: BatchEntry) {
        if let Some(tx) = self.tx.take() {
            // Capacity equals the batch size, so this never sees a full channel
            let _ = tx.try_send(entry);
        }
    }
}

impl Drop for EntryReporter {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.try_send(BatchEntry::failure(std::mem::take(&mut self.url)));
        }
    }
}
