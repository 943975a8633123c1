//! Application builder: wires router, middleware, and state into an Axum app.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use booking_core::config::{AppConfig, CorsConfig, DatabaseProvider};
use booking_core::error::AppError;
use booking_database::{DatabasePool, Repositories, migration};

use crate::error::ApiError;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = state.config.server.cors.clone();
    apply_layers(build_router(state), &cors)
}

/// Wraps a router in the panic boundary, CORS, and request tracing.
pub fn apply_layers(router: Router, cors: &CorsConfig) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(build_cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// Turns a handler panic into the generic 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = %detail, "Handler panicked");
    ApiError(AppError::internal("Handler panicked")).into_response()
}

/// Builds the repositories for the configured provider.
pub async fn connect_repositories(
    config: &AppConfig,
) -> Result<(Repositories, Option<DatabasePool>), AppError> {
    match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                migration::run_migrations(pool.pool()).await?;
            }
            Ok((Repositories::postgres(pool.pool().clone()), Some(pool)))
        }
        DatabaseProvider::Memory => {
            warn!("Using in-memory repositories; data is lost on shutdown");
            Ok((Repositories::memory(), None))
        }
    }
}

/// Runs the booking server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting booking server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Repositories ─────────────────────────────────────
    let (repos, pool) = connect_repositories(&config).await?;

    // ── Step 2: Auth system and state ────────────────────────────
    // Token settings are validated here; a bad key stops startup.
    let state = AppState::new(config.clone(), repos)?;
    info!(
        issuer = %config.auth.issuer,
        audience = %config.auth.audience,
        ttl_minutes = config.auth.token_ttl_minutes,
        "Token settings loaded"
    );

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Booking server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Release connections ──────────────────────────────
    if let Some(pool) = pool {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            warn!("Database pool did not close within the grace period");
        }
    }

    info!("Booking server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
