//! Favicon Scout main entry point
//!
//! This is the command-line interface that starts the favicon HTTP service.

use clap::Parser;
use favicon_scout::config::{load_config_with_hash, validate, Config};
use favicon_scout::server::FaviconServer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Favicon Scout: find the favicon of any web page
///
/// Serves `GET /favicon?url=...` for one page and
/// `GET /favicons?url=...&url=...` for many pages fetched concurrently.
#[derive(Parser, Debug)]
#[command(name = "favicon-scout")]
#[command(version)]
#[command(about = "Favicon lookup service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address, e.g. 127.0.0.1:8080
    #[arg(short, long, value_name = "ADDR")]
    listen: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the effective settings without serving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }
    validate(&config)?;

    if cli.dry_run {
        print_settings(&config);
        return Ok(());
    }

    let server = FaviconServer::new(config);
    if let Err(e) = server.run(shutdown_signal()).await {
        tracing::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("favicon_scout=info,tower_http=info,warn"),
            1 => EnvFilter::new("favicon_scout=debug,tower_http=debug,info"),
            2 => EnvFilter::new("favicon_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves on Ctrl-C / SIGINT
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for interrupt signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Interrupt received");
}

/// Handles --dry-run: shows the effective configuration
fn print_settings(config: &Config) {
    println!("=== Favicon Scout Dry Run ===\n");

    println!("Server:");
    println!("  Listen address: {}", config.server.listen_addr);
    println!("  Request timeout: {}s", config.server.request_timeout_secs);
    println!("  Write timeout: {}s", config.server.write_timeout_secs);
    println!("  Shutdown grace: {}s", config.server.shutdown_grace_secs);

    println!("\nFetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\n✓ Configuration is valid");
}
