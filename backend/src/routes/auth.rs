//! Credential exchange
//!
//! `POST /v{version}/token` trades a username and password for a bearer token.
//!
//! # Performance
//! Password verification is offloaded to the blocking thread pool; signing
//! uses the pre-computed keys in `AppState`.

use super::version::ApiVersion;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use jwt_auth_shared::types::{TokenRequest, TokenResponse};
use tracing::info;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(issue_token))
}

/// Issue a token for valid credentials
///
/// POST /v1/token
async fn issue_token(
    _version: ApiVersion,
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .users()
        .authenticate(req.username.as_deref(), req.password)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let token = state.jwt().generate_token(Some(&user))?;
    info!(username = %user.username, "Issued access token");

    Ok(Json(TokenResponse { token }))
}
