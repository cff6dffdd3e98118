use config::Config;
use clap::Parser;
use fetcher::IetfSource;
use state::AppState;
use tracing_subscriber::EnvFilter;

use crate::db::Database;

pub mod config;
pub mod db;
pub mod error;
pub mod fetcher;
pub mod routes;
pub mod services;
pub mod state;

/// jemalloc is an allocator that is more efficient for the server.
#[cfg(feature = "jemalloc")]
#[global_allocator]
static ALLOC: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // Initialise the logger
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .init();

    let db = Database::new(config.database.clone())?;
    if db.path().is_none() {
        tracing::warn!("No database file given, nothing will outlive the process");
    }

    let source = IetfSource::new(config.rfc_host.clone());
    tracing::info!("Fetching RFC documents from {}", source.host());

    start(&config, AppState::new(db, source)).await
}

pub async fn start(
    config: &Config,
    state: AppState<IetfSource>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind.as_str()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
