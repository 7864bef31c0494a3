//! Server initialization and runtime setup.
//!
//! Builds the storage backend, seeds the identifier source, and runs the
//! HTTP server (plus the gRPC server with the `grpc` feature) until the
//! process is asked to stop.

use crate::application::services::{DynShortenerService, ShortenerService};
use crate::codegen::{CodeGenerator, IdSource, SequentialCodeGenerator};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::memory::InMemoryUrlRepository;
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Runs the servers with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool and migrations, or in-memory maps)
/// - Identifier source seeded past every stored code
/// - Axum HTTP server
/// - Tonic gRPC server (`grpc` feature)
///
/// Returns once a shutdown signal has been received and in-flight requests
/// have drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - A stored short code cannot be decoded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let shortener = Arc::new(build_shortener(&config).await?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let http = serve_http(&config, shortener.clone(), shutdown_rx.clone());

    #[cfg(feature = "grpc")]
    {
        tokio::try_join!(http, serve_grpc(&config, shortener, shutdown_rx))?;
    }

    #[cfg(not(feature = "grpc"))]
    {
        http.await?;
    }

    info!("Shutdown complete");
    Ok(())
}

/// Wires the configured backend and a seeded code generator into the service.
///
/// # Errors
///
/// Returns an error if the PostgreSQL backend cannot be prepared.
pub async fn build_shortener(config: &Config) -> Result<DynShortenerService> {
    let (storage, first_id): (Arc<dyn UrlRepository>, u64) = match config.storage {
        StorageBackend::InMemory => {
            info!("Using in-memory storage");
            (Arc::new(InMemoryUrlRepository::new()), 0)
        }
        StorageBackend::Postgres => {
            let pool = connect_database(config).await?;
            let repository = PgUrlRepository::new(Arc::new(pool));
            let max_id = repository
                .max_issued_id()
                .await
                .context("Failed to read issued identifiers")?;
            (Arc::new(repository), max_id + 1)
        }
    };

    info!(first_id, "Identifier source seeded");

    let ids = Arc::new(IdSource::new(first_id));
    let codes: Arc<dyn CodeGenerator> = Arc::new(SequentialCodeGenerator::new(ids));

    Ok(ShortenerService::new(storage, codes)
        .with_conflict_recovery(config.resolve_create_conflicts))
}

/// Connects the pool with the configured limits and applies migrations.
async fn connect_database(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required with the postgres backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

async fn serve_http(
    config: &Config,
    shortener: Arc<DynShortenerService>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let app = app_router(
        AppState::new(shortener),
        Duration::from_secs(config.http_timeout),
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .context("Invalid LISTEN address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(wait_for(shutdown))
        .await?;

    Ok(())
}

#[cfg(feature = "grpc")]
async fn serve_grpc(
    config: &Config,
    shortener: Arc<DynShortenerService>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    use crate::api::middleware::tracing::grpc_layer;
    use crate::rpc::ShortenerGrpcServer;
    use crate::rpc::proto::url_shortener_server::UrlShortenerServer;

    let addr: SocketAddr = config
        .grpc_listen_addr
        .parse()
        .context("Invalid GRPC_LISTEN address")?;
    info!("Listening on grpc://{addr}");

    tonic::transport::Server::builder()
        .layer(grpc_layer())
        .add_service(UrlShortenerServer::new(ShortenerGrpcServer::new(shortener)))
        .serve_with_shutdown(addr, wait_for(shutdown))
        .await?;

    Ok(())
}

async fn wait_for(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Completes on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
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

    info!("Shutdown signal received, draining connections");
}
