mod routes;
mod state;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use patro_core::PatroConfig;
use patro_core::store::Store;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(name = "patro-server")]
#[command(about = "Serve scraped Nepali calendar data over HTTP")]
struct Args {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Serve this directory instead of the configured data_dir
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = PatroConfig::load()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let store = Store::from_config(&config);
    tracing::info!(data_dir = %store.root().display(), "serving calendar data");

    let app = routes::app(AppState::new(store));

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("patro-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
