//! Protected weather forecast
//!
//! `GET /v{version}/weather` requires a valid bearer token.

use super::version::ApiVersion;
use crate::auth::AuthUser;
use crate::services::WeatherService;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use jwt_auth_shared::types::WeatherForecast;
use tracing::debug;

/// Create weather routes
pub fn weather_routes() -> Router<AppState> {
    Router::new().route("/weather", get(get_forecast))
}

/// Five-day forecast
///
/// GET /v1/weather
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn get_forecast(_version: ApiVersion, user: AuthUser) -> Json<Vec<WeatherForecast>> {
    debug!(username = %user.username, role = %user.role, "Serving forecast");
    Json(WeatherService::forecast(Utc::now()))
}
