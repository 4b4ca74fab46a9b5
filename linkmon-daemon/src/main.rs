use linkmon_core::{init_observability, Config, HealthChecker, StatusStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod api;
mod dashboard;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize observability FIRST
    init_observability()?;

    info!("linkmond starting");

    let config = Config::load()?;

    // Initialize health checker
    let health = HealthChecker::new();
    health.register_subsystem("daemon".to_string()).await;

    // Open the status store; single instance for the process lifetime,
    // handed to the API by reference rather than held globally
    let db_path = std::env::var("LINKMON_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| linkmon_core::paths::db_path());

    info!("Opening status store at {}", db_path.display());
    let store = Arc::new(StatusStore::open(&db_path).await?);
    health.register_subsystem("database".to_string()).await;

    let listen_addr =
        std::env::var("LINKMON_LISTEN_ADDR").unwrap_or_else(|_| config.listen_addr.clone());

    info!("linkmond ready");

    // Start HTTP API server
    let server = tokio::spawn(api::serve(listen_addr, store.clone(), health));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    server.abort();
    let _ = server.await;

    store.close().await;
    info!("linkmond shut down");
    Ok(())
}
