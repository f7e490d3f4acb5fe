//! Liveness and readiness
//!
//! Readiness proves the auth core is usable: the configured seed user can be
//! looked up, and a token issued for it validates with the same service.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub seed_user_loaded: bool,
    pub token_round_trip: bool,
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /health/ready
///
/// 503 until both checks pass.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessReport>) {
    let report = check_readiness(&state).await;
    let status = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

async fn check_readiness(state: &AppState) -> ReadinessReport {
    let username = &state.config().seed_user.username;
    let seed_user = match state.users().get_user(Some(username)).await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, "User store unavailable");
            None
        }
    };

    let token_round_trip = seed_user.as_ref().is_some_and(|user| {
        state
            .jwt()
            .generate_token(Some(user))
            .and_then(|token| state.jwt().validate_token(&token))
            .map(|identity| identity.id == user.id)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Token self-check failed");
                false
            })
    });

    ReadinessReport {
        ready: seed_user.is_some() && token_round_trip,
        seed_user_loaded: seed_user.is_some(),
        token_round_trip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SystemClock;
    use crate::config::{AppConfig, JwtConfig, SeedUserConfig, ServerConfig};
    use crate::repositories::InMemoryUserRepository;
    use secrecy::SecretString;
    use std::sync::Arc;
    use uuid::Uuid;

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            jwt: JwtConfig {
                secret: Some(SecretString::new("test-secret".to_string())),
                issuer: "jwt-auth".to_string(),
                audience: "jwt-auth-clients".to_string(),
                token_lifetime_secs: 300,
            },
            seed_user: SeedUserConfig {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                role: "Administrator".to_string(),
                password: Some(SecretString::new("correct".to_string())),
            },
        }
    }

    #[tokio::test]
    async fn test_ready_with_seeded_state() {
        let state = AppState::new(test_config()).unwrap();
        let (status, Json(report)) = readiness(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(report.seed_user_loaded);
        assert!(report.token_round_trip);
    }

    #[tokio::test]
    async fn test_not_ready_when_seed_user_missing() {
        let state = AppState::from_parts(
            test_config(),
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(SystemClock),
        )
        .unwrap();
        let (status, Json(report)) = readiness(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!report.ready);
        assert!(!report.seed_user_loaded);
        assert!(!report.token_round_trip);
    }

    #[tokio::test]
    async fn test_liveness_has_no_body() {
        assert_eq!(liveness().await, StatusCode::NO_CONTENT);
    }
}
