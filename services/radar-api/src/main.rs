//! Radar reflectivity snapshot service.
//!
//! Serves the most recent MRMS ReflectivityAtLowestAltitude grid as
//! geolocated samples with:
//! - TTL-cached snapshots (one in-memory slot)
//! - Synthetic storm-field fallback when the feed is unreachable
//! - Explicit CORS origin allow-list
//! - HTTP health endpoint exposing cache state

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use radar_api::config::{self, ServiceConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_PORT};
use radar_api::server;
use radar_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "radar-api")]
#[command(about = "Radar reflectivity snapshot server with synthetic fallback")]
struct Args {
    /// Listening port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// MRMS directory URL
    #[arg(long, env = "MRMS_BASE_URL", default_value = mrms_source::DEFAULT_BASE_URL)]
    mrms_url: String,

    /// Snapshot cache TTL in milliseconds
    #[arg(long, env = "CACHE_TTL_MS", default_value_t = config::CACHE_TTL.as_millis() as u64)]
    cache_ttl_ms: u64,

    /// Grid subsampling stride
    #[arg(long, env = "SAMPLE_STRIDE", default_value_t = radar_sampling::DEFAULT_STRIDE)]
    stride: usize,

    /// Comma-separated CORS origin allow-list
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ALLOWED_ORIGINS)]
    allowed_origins: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting radar snapshot service");

    let config = ServiceConfig {
        port: args.port,
        base_url: args.mrms_url,
        cache_ttl: std::time::Duration::from_millis(args.cache_ttl_ms),
        stride: args.stride,
        allowed_origins: config::parse_origins(&args.allowed_origins),
    };

    info!(
        port = config.port,
        base_url = %config.base_url,
        ttl_ms = config.cache_ttl.as_millis() as u64,
        stride = config.stride,
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config));

    server::run_server(state).await
}
