//! Service runtime: storage selection, router assembly and graceful shutdown.
//!
//! Used by the `carriers-service` binary; embedders can call [`run`] or
//! [`build_router`] directly.

use std::sync::{Arc, OnceLock};

use axum::Router;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::CarrierService;
use crate::config::{AppConfig, StorageBackend};
use crate::domain::CarrierRepository;
use crate::infrastructure::{
    init_database, run_migrations, InMemoryCarrierRepository, SeaOrmCarrierRepository,
};
use crate::interfaces::http::modules::metrics::{install_recorder, MetricsState};
use crate::interfaces::http::{create_api_router, RouterConfig};
use crate::shared::{listen_for_shutdown_signals, ShutdownSignal};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub struct ServerOptions {
    /// Run database migrations on startup (default: true)
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { auto_migrate: true }
    }
}

/// Set up the global tracing subscriber from the logging section.
/// `RUST_LOG` wins over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialised: {e}");
    }
}

async fn open_repository(
    config: &AppConfig,
    options: &ServerOptions,
) -> Result<Arc<dyn CarrierRepository>, ServerError> {
    match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; carriers are lost on restart");
            Ok(Arc::new(InMemoryCarrierRepository::new()))
        }
        StorageBackend::Sqlite => {
            let db = init_database(&config.database.connection_url()).await?;
            if options.auto_migrate {
                info!("Running database migrations...");
                run_migrations(&db).await?;
            }
            Ok(Arc::new(SeaOrmCarrierRepository::new(db)))
        }
    }
}

/// The Prometheus recorder is process-global and can only be installed once.
fn metrics_state() -> Option<MetricsState> {
    static HANDLE: OnceLock<Option<MetricsState>> = OnceLock::new();
    HANDLE
        .get_or_init(|| match install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(MetricsState { handle })
            }
            Err(e) => {
                warn!("Metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// Open storage and assemble the HTTP router for `config`.
pub async fn build_router(config: &AppConfig, options: &ServerOptions) -> Result<Router, ServerError> {
    let repository = open_repository(config, options).await?;
    let service = Arc::new(CarrierService::new(repository, config.max_page_size()));

    let metrics = if config.metrics.enabled {
        metrics_state()
    } else {
        None
    };

    Ok(create_api_router(RouterConfig {
        service,
        backend: config.database.backend.as_str(),
        cors: config.cors.clone(),
        metrics,
    }))
}

/// Serve until SIGINT / SIGTERM.
pub async fn run(config: AppConfig, options: ServerOptions) -> Result<(), ServerError> {
    info!("Starting carriers service...");
    let router = build_router(&config, &options).await?;

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("REST API listening on http://{}", address);
    info!("Swagger UI: http://{}/docs", address);

    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await
        .map_err(ServerError::Serve)?;

    info!("Carriers service stopped");
    Ok(())
}
