//! Favicon Scout: a small favicon lookup service
//!
//! This crate fetches web pages, finds the most likely favicon declared in
//! their HTML, and serves the result over HTTP for one URL or a batch of URLs
//! fetched concurrently.

pub mod config;
pub mod favicon;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Favicon Scout operations
#[derive(Debug, Error)]
pub enum FaviconError {
    #[error("Missing 'url' query parameter")]
    InvalidInput,

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Failed to create request for {url}: {message}")]
    RequestCreation { url: String, message: String },

    #[error("Failed to fetch page {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request for {url} was cancelled or ran past its deadline")]
    Cancelled { url: String },

    #[error("Failed to fetch page {url}, status code: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FaviconError {
    /// Returns true if the error happened while retrieving the page, as
    /// opposed to while reading its markup
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. }
                | Self::RequestCreation { .. }
                | Self::Network { .. }
                | Self::Cancelled { .. }
                | Self::HttpStatus { .. }
                | Self::BodyRead { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Favicon Scout operations
pub type Result<T> = std::result::Result<T, FaviconError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use favicon::{extract_favicon, fan_out, fetch_html, find_favicon, BatchEntry, FetchContext};
pub use crate::url::{base_url, is_valid, normalize};
