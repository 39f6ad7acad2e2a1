//! Request handlers for the favicon endpoints

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::favicon::{fan_out, find_favicon, FetchContext};
use crate::FaviconError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    /// Deadline for all fetches spawned by one request
    pub request_timeout: Duration,
}

impl AppState {
    fn request_context(&self) -> FetchContext {
        FetchContext::with_timeout(self.request_timeout)
    }
}

/// Single-fetch endpoint: `GET /favicon?url=...`
///
/// Responds with the icon URL as plain text.
pub async fn single_favicon(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let Some(target) = url_params(query.as_deref()).into_iter().next() else {
        return error_response(&FaviconError::InvalidInput);
    };

    debug!("Single favicon request for {}", target);

    let ctx = state.request_context();
    let _cancel_on_drop = ctx.drop_guard();

    match find_favicon(&state.client, &ctx, &target).await {
        Ok(icon) => (StatusCode::OK, icon).into_response(),
        Err(e) => {
            warn!("Favicon lookup failed for {}: {}", target, e);
            error_response(&e)
        }
    }
}

/// Batch endpoint: `GET /favicons?url=...&url=...`
///
/// Always 200 with one JSON entry per `url` parameter once at least one is
/// given.
pub async fn batch_favicons(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let urls = url_params(query.as_deref());
    if urls.is_empty() {
        return error_response(&FaviconError::InvalidInput);
    }

    debug!("Batch favicon request for {} URLs", urls.len());

    let ctx = state.request_context();
    let _cancel_on_drop = ctx.drop_guard();

    let entries = fan_out(&state.client, &ctx, urls).await;
    (StatusCode::OK, Json(entries)).into_response()
}

/// Collects every non-empty `url` value from a raw query string, in order
pub fn url_params(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };

    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, value)| key == "url" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .collect()
}

/// Maps an error to its status code and a plain-text body
pub fn error_response(error: &FaviconError) -> Response {
    let status = match error {
        FaviconError::InvalidInput => StatusCode::BAD_REQUEST,
        e if e.is_fetch_failure() => StatusCode::INTERNAL_SERVER_ERROR,
        FaviconError::Parse(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string()).into_response()
}
