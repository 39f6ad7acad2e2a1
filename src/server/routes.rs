//! HTTP route definitions

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Create the router with both favicon endpoints
///
/// `write_timeout` caps the time spent producing any single response.
pub fn create_router(state: AppState, write_timeout: Duration) -> Router {
    Router::new()
        .route("/favicon", get(handlers::single_favicon))
        .route("/favicons", get(handlers::batch_favicons))
        .with_state(state)
        .layer(TimeoutLayer::new(write_timeout))
        .layer(TraceLayer::new_for_http())
}
