//! HTTP server
//!
//! Axum-based listener exposing the single and batch favicon endpoints,
//! with graceful shutdown bounded by a drain window.

mod handlers;
mod routes;

pub use handlers::{error_response, url_params, AppState};
pub use routes::create_router;

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::favicon::build_http_client;
use crate::{FaviconError, Result};

/// Favicon HTTP server
pub struct FaviconServer {
    config: Config,
}

impl FaviconServer {
    /// Create a new server from a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the router with a fresh HTTP client
    pub fn router(&self) -> Result<axum::Router> {
        let state = AppState {
            client: build_http_client(&self.config.fetcher)?,
            request_timeout: self.config.server.request_timeout(),
        };
        Ok(create_router(state, self.config.server.write_timeout()))
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.server.listen_addr.parse().map_err(|e| {
            FaviconError::Config(crate::ConfigError::Validation(format!(
                "Invalid listen address '{}': {}",
                self.config.server.listen_addr, e
            )))
        })?;

        let listener = TcpListener::bind(&addr).await?;
        info!("Favicon server listening on http://{}", listener.local_addr()?);

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener
    ///
    /// Once `shutdown` resolves, new connections are refused and in-flight
    /// requests get the configured grace period to finish. Anything still
    /// running after that is dropped.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        let grace = self.config.server.shutdown_grace();

        let stop = CancellationToken::new();
        let stop_serving = stop.clone();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { stop_serving.cancelled().await })
                .await
        });

        tokio::select! {
            result = &mut server => return finish(result),
            _ = shutdown => {}
        }

        info!("Shutting down, draining in-flight requests for up to {:?}", grace);
        stop.cancel();

        match tokio::time::timeout(grace, &mut server).await {
            Ok(result) => {
                finish(result)?;
                info!("Server stopped gracefully");
                Ok(())
            }
            Err(_) => {
                warn!("Drain window elapsed, dropping remaining requests");
                server.abort();
                Ok(())
            }
        }
    }
}

fn finish(result: std::result::Result<std::io::Result<()>, tokio::task::JoinError>) -> Result<()> {
    match result {
        Ok(served) => Ok(served?),
        Err(e) => Err(FaviconError::Io(std::io::Error::other(e))),
    }
}
