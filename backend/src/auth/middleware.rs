//! Authentication extractor
//!
//! Validates the bearer token on a request and hands the identity it carries
//! to the handler. Every failure becomes the same 401; the specific reason is
//! only logged.

use super::jwt::AuthIdentity;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

/// Authenticated user extracted from JWT
///
/// Lives for the request that produced it. Nothing is cached.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthIdentity);

impl std::ops::Deref for AuthUser {
    type Target = AuthIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Some(token) = bearer_token(&parts.headers) else {
            debug!("Request carries no bearer token");
            return Err(ApiError::Unauthorized);
        };

        let identity = app_state.jwt().validate_token(token).map_err(|e| {
            warn!(reason = %e, "Rejected bearer token");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("Bearer   abc.def.ghi  ", Some("abc.def.ghi"))]
    #[case("Bearer ", None)]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def.ghi", None)]
    fn test_bearer_token_parsing(#[case] header: &str, #[case] expected: Option<&str>) {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(header).unwrap());
        assert_eq!(bearer_token(&headers), expected);
    }

    #[test]
    fn test_missing_header_yields_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
