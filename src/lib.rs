pub mod analysis;
pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod timesheet;

use std::sync::Arc;

use anyhow::Context;
use log::info;

use config::ServiceConfig;
use db::{Database, PeriodStore};
use timesheet::TimesheetController;

pub async fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("timesheets starting up...");

    let config = ServiceConfig::load()?;
    let database = Database::new(config.database_path.clone())?;
    info!("using database at {}", config.database_path.display());

    let store: Arc<dyn PeriodStore> = Arc::new(database);
    let app = http::router(TimesheetController::new(store));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("timesheets shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
