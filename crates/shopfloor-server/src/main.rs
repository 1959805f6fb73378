//! Shopfloor Server

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopfloor_server::{http, AppState, Config, KvConfig};

/// Shopfloor attendance, production planning and material tracking server.
#[derive(Parser, Debug)]
#[command(name = "shopfloor-server", about = "Shopfloor attendance and production planning server")]
struct Args {
    /// HTTP server address
    #[arg(long, env = "SHOPFLOOR_BIND_ADDR", default_value = "127.0.0.1:5000")]
    bind_addr: String,

    /// Directory for the attendance, production and material CSV files
    #[arg(long, env = "SHOPFLOOR_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Employee and part roster (JSON)
    #[arg(long, env = "SHOPFLOOR_ROSTER", default_value = "data/roster.json")]
    roster: PathBuf,

    /// Standard minutes per unit table (CSV)
    #[arg(long, env = "SHOPFLOOR_STANDARD_TIMES", default_value = "data/wp_data.csv")]
    standard_times: PathBuf,

    /// Key-value REST endpoint; with --kv-token, replaces CSV storage
    #[arg(long, env = "KV_REST_API_URL")]
    kv_url: Option<String>,

    /// Key-value REST token
    #[arg(long, env = "KV_REST_API_TOKEN", hide_env_values = true)]
    kv_token: Option<String>,

    /// Attendance denominator (defaults to the roster size)
    #[arg(long, env = "SHOPFLOOR_MAX_EMPLOYEES")]
    max_employees: Option<usize>,
}

impl Args {
    fn into_config(self) -> Config {
        let kv = match (self.kv_url, self.kv_token) {
            (Some(url), Some(token)) => Some(KvConfig { url, token }),
            (Some(_), None) | (None, Some(_)) => {
                warn!("Both KV_REST_API_URL and KV_REST_API_TOKEN are needed - using CSV storage");
                None
            }
            (None, None) => None,
        };

        Config {
            bind_addr: self.bind_addr,
            data_dir: self.data_dir,
            roster_path: self.roster,
            standard_times_path: self.standard_times,
            kv,
            max_employees: self.max_employees,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("shopfloor_server=info,shopfloor_core=info,tower_http=info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = args.into_config();
    let http_addr: SocketAddr = config.bind_addr.parse()?;

    let state = AppState::load(config).await?;
    let router = http::create_router(state);

    let listener = TcpListener::bind(http_addr).await?;
    info!(http_addr = %http_addr, "Starting Shopfloor server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shopfloor server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
