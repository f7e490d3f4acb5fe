//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::auth::TokenError;
use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jwt_auth_shared::types::{ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Deliberately carries no reason; clients must not learn which check failed.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported API version: {0}")]
    UnsupportedApiVersion(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidInput(msg) => ApiError::BadRequest(msg.to_string()),
            TokenError::Encoding(e) => ApiError::Internal(anyhow::Error::new(e)),
            TokenError::ExpiryOutOfRange => {
                ApiError::Internal(anyhow::Error::new(TokenError::ExpiryOutOfRange))
            }
            rejection => {
                warn!(reason = %rejection, "Token rejected");
                ApiError::Unauthorized
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::UnsupportedApiVersion(version) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_API_VERSION",
                format!("API version '{}' is not supported", version),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field: None,
            },
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
