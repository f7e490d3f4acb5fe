//! Route definitions for the JWT auth API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod version;
mod weather;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use version::{supported_versions_header, ApiVersion};
pub use weather::weather_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/:version", api_routes())
        // Apply middleware layers
        .layer(SetResponseHeaderLayer::overriding(
            supported_versions_header(),
            ApiVersion::supported_header_value(),
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Versioned API routes, mounted under `/:version`
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::auth_routes())
        .merge(weather::weather_routes())
}
