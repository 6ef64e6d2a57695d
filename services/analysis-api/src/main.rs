//! Analysis API Server
//!
//! HTTP front end for mineral potential analysis and hotspot detection.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use analysis_api::build_router;
use analysis_api::config::AnalysisConfig;
use analysis_api::state::AppState;

/// Analysis API Server
#[derive(Parser, Debug)]
#[command(name = "analysis-api")]
#[command(about = "Mineral potential analysis and hotspot detection server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "ANALYSIS_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "ANALYSIS_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// YAML configuration file (overrides ANALYSIS_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting analysis API server");

    let config = match &args.config {
        Some(path) => {
            let mut config = AnalysisConfig::load_from_file(path)?;
            config.apply_env();
            config
        }
        None => AnalysisConfig::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    info!(
        aoi = ?config.default_aoi,
        scene = ?config.scene_source(),
        threshold = config.hotspot_threshold,
        grid_resolution = config.grid.resolution,
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config).with_prometheus(prometheus));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
