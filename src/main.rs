use axum::{extract::Request, ServiceExt};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info, warn};

use catalog_rest_api::{
    config::{Config, StorageConfig},
    create_app,
    middleware::init_tracing,
    seed::SeedCatalog,
    Database, InMemoryRepository, SharedRepository,
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => {
            info!(
                "Configuration loaded successfully (production: {})",
                config.environment.is_production()
            );
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let repo = match open_repository(&config).await {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to prepare storage: {}", e);
            std::process::exit(1);
        }
    };

    if config.seed_data {
        if let Err(e) = repo.seed(&SeedCatalog::starter()).await {
            error!("Failed to seed catalog data: {}", e);
            std::process::exit(1);
        }
    }

    let app = create_app(repo);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Server listening on {}", addr);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Connects to PostgreSQL and migrates it, or falls back to process memory
/// when no database is configured.
async fn open_repository(config: &Config) -> Result<SharedRepository, catalog_rest_api::ApiError> {
    match &config.storage {
        StorageConfig::Postgres(db_config) => {
            let database = Database::new(db_config.clone()).await?;
            info!("Database connection established");

            database.migrate().await?;
            let repo: SharedRepository = Arc::new(database);
            Ok(repo)
        }
        StorageConfig::InMemory => {
            warn!("DATABASE_URL is not set, using in-memory storage; data is lost on shutdown");
            let repo: SharedRepository = Arc::new(InMemoryRepository::new());
            Ok(repo)
        }
    }
}

/// Graceful shutdown signal handler
/// Listens for SIGTERM and SIGINT signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        },
    }
}
