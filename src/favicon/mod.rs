//! Favicon lookup pipeline
//!
//! This module contains the core lookup logic:
//! - Page fetching with a bounded timeout and request-scoped cancellation
//! - HTML scanning and the icon selection policy
//! - Concurrent fan-out over a batch of URLs

mod context;
mod coordinator;
mod extractor;
mod fetcher;

pub use context::FetchContext;
pub use coordinator::{fan_out, find_favicon, BatchEntry};
pub use extractor::{extract_favicon, resolve_icon_href, IconCandidate};
pub use fetcher::{build_http_client, fetch_html};
