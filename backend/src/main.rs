//! JWT Auth Backend
//!
//! Exchanges a username and password for a short-lived HS256 bearer token
//! and serves a weather forecast to holders of a valid token.
//!
//! ## Architecture
//!
//! - Routes: HTTP handling, API versioning, bearer extraction
//! - Services: credential verification, forecast generation
//! - Repositories: user lookup (in-memory seed user)
//! - Auth: token issuance and validation, password hashing

use anyhow::Result;
use jwt_auth_backend::{config, routes, state::AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    // Missing signing secret stops the process here
    let config = config::AppConfig::load().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        issuer = %config.jwt.issuer,
        audience = %config.jwt.audience,
        token_lifetime_secs = config.jwt.token_lifetime_secs,
        "Starting JWT Auth Backend"
    );

    if config::AppConfig::is_production() {
        config.validate_for_production().map_err(|e| {
            error!("Configuration error: {}", e);
            e
        })?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Hashes the seed user's password and derives signing keys
    let state = AppState::new(config)?;

    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "jwt_auth_backend=info,tower_http=info".into()
        } else {
            "jwt_auth_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
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
            Ok(mut sig) => {
                sig.recv().await;
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
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
