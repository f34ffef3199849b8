//! series-service - Read-only series lookup service
//!
//! Loads universes, series and works from a directory of JSON files once
//! at startup, resolves work metadata through the enrichment gateway and
//! serves lookups over HTTP.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use series_common::config::{load_toml_config, CliOverrides, ServiceConfig};
use series_common::enrichment::{fetch_metadata, HttpMetadataClient, NoMetadata};
use series_common::{loader, Catalog, Lookup};
use series_service::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for series-service
#[derive(Parser, Debug)]
#[command(name = "series-service")]
#[command(about = "Series lookup service")]
#[command(version)]
struct Args {
    /// Port to listen on [default: 5000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    host: Option<String>,

    /// Directory containing series JSON data files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// AB id of the service [default: 1]
    #[arg(short, long)]
    ab_id: Option<String>,

    /// URL of the work metadata enrichment gateway
    #[arg(long)]
    enrichment_url: Option<String>,

    /// Path to TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose, args.json_logs);

    info!(
        "Starting series-service v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let file_config = load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServiceConfig::resolve(
        CliOverrides {
            host: args.host,
            port: args.port,
            data_dir: args.data_dir,
            enrichment_url: args.enrichment_url,
            ab_id: args.ab_id,
        },
        file_config,
    )?;

    // Catalog must be complete before any request is served
    let catalog = match &config.data_dir {
        Some(dir) => loader::load_dir(dir)
            .with_context(|| format!("Failed to load data files from {}", dir.display()))?,
        None => {
            info!("No data directory configured, starting with an empty catalog");
            Catalog::new()
        }
    };

    let work_ids = catalog.work_ids();
    let metadata = match &config.enrichment_url {
        Some(url) => {
            info!("Resolving work metadata via {}", url);
            let client = HttpMetadataClient::new(url.as_str())?;
            fetch_metadata(&client, &work_ids).await
        }
        None => fetch_metadata(&NoMetadata, &work_ids).await,
    };

    let state = AppState::new(Lookup::new(catalog, metadata), config.ab_id.clone());
    info!("Instance id: {}", state.status.instance_id);
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("series-service listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(verbose: bool, json_logs: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "series_service={level},series_common={level},tower_http={level}",
            level = default_level
        )
        .into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resolves once the process is asked to stop
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let reason = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    info!("Received {}, draining in-flight lookups", reason);
}
