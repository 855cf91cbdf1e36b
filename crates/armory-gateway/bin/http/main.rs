mod cli;

use crate::cli::{StorageBackendArg, CLI};
use armory_core::{InMemoryItemRepository, ItemCatalog};
use armory_gateway::{App, AppState};
use armory_service::ItemService;
use armory_storage::{PoolSettings, PostgresItemRepository};
use armory_telemetry::TracingConfig;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::try_parse()?;

    armory_telemetry::init_tracing(&TracingConfig {
        format: config.log_format.into(),
        ..TracingConfig::default()
    })?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let catalog: Arc<dyn ItemCatalog> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(ItemService::new(InMemoryItemRepository::new())),
        StorageBackendArg::Postgres => {
            let database_url = config
                .database_url
                .ok_or("database url is required when storage backend is postgres")?;
            let settings = PoolSettings::builder()
                .max_connections(config.max_connections)
                .build();
            let repository = PostgresItemRepository::connect_with(&database_url, settings).await?;
            Arc::new(ItemService::new(repository))
        }
    };

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway server listening");

    axum::serve(listener, App::router(AppState::new(catalog)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
