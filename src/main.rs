use ambulance_telemetry::api::{self, AppState};
use ambulance_telemetry::config::{AppConfig, StoreBackend};
use ambulance_telemetry::db;
use ambulance_telemetry::processor::TelemetryService;
use ambulance_telemetry::store::{MemoryVehicleStore, PgVehicleStore, VehicleStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Ambulance Telemetry Service...");

    // Init store
    let store: Arc<dyn VehicleStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
            info!("Connected to database");
            Arc::new(PgVehicleStore::new(pool))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store, snapshots are lost on restart");
            Arc::new(MemoryVehicleStore::new())
        }
    };

    let service = Arc::new(TelemetryService::new(store, config.offline_threshold));
    info!(
        "Offline threshold: {}s",
        service.offline_threshold().num_seconds()
    );

    let router = api::router(AppState {
        service: service.clone(),
    });

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown().await;
    info!("Store closed, bye");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
