//! Property-based tests for authentication enforcement
//!
//! Any request to the protected endpoint without a valid token gets 401.

#[cfg(test)]
mod tests {
    use crate::auth::TokenService;
    use crate::config::{AppConfig, JwtConfig, SeedUserConfig, ServerConfig};
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{header::WWW_AUTHENTICATE, Request, StatusCode},
    };
    use proptest::prelude::*;
    use secrecy::SecretString;
    use tower::ServiceExt;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn jwt_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: Some(SecretString::new(secret.to_string())),
            issuer: "jwt-auth".to_string(),
            audience: "jwt-auth-clients".to_string(),
            token_lifetime_secs: 300,
        }
    }

    /// Create a test app state (sync version for proptest)
    fn create_test_state_sync() -> AppState {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            jwt: jwt_config(SECRET),
            seed_user: SeedUserConfig {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                role: "Administrator".to_string(),
                password: Some(SecretString::new("correct".to_string())),
            },
        };
        AppState::new(config).unwrap()
    }

    async fn weather_status(state: AppState, auth_header: Option<String>) -> StatusCode {
        let app = create_router(state);

        let mut request_builder = Request::builder().uri("/v1/weather").method("GET");
        if let Some(header) = auth_header {
            request_builder = request_builder.header("Authorization", header);
        }

        let request = request_builder.body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    /// Generate random invalid tokens
    fn invalid_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            // Empty token
            Just("".to_string()),
            // Random string (not a valid JWT)
            "[a-zA-Z0-9]{10,50}",
            // Malformed JWT (wrong number of parts)
            "[a-zA-Z0-9]{10}\\.[a-zA-Z0-9]{10}",
            // Valid format but invalid signature
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}",
        ]
    }

    /// Generate random authorization header formats
    fn auth_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            // No header
            Just(None),
            // Missing Bearer prefix
            invalid_token_strategy().prop_map(Some),
            // Wrong prefix
            invalid_token_strategy().prop_map(|t| Some(format!("Basic {}", t))),
            // Bearer with invalid token
            invalid_token_strategy().prop_map(|t| Some(format!("Bearer {}", t))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Unauthenticated requests to protected endpoints return 401
        #[test]
        fn prop_unauthenticated_requests_return_401(
            auth_header in auth_header_strategy()
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let state = create_test_state_sync();
            let status = rt.block_on(weather_status(state, auth_header));

            prop_assert_eq!(
                status,
                StatusCode::UNAUTHORIZED,
                "Expected 401 for unauthenticated request"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_auth_header_returns_401_with_challenge() {
        let app = create_router(create_test_state_sync());

        let request = Request::builder()
            .uri("/v1/weather")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }

    #[tokio::test]
    async fn test_token_with_wrong_secret_returns_401() {
        let state = create_test_state_sync();

        // Sign a token for the seed user with a DIFFERENT secret
        let user = state.users().get_user(Some("alice")).await.unwrap();
        let foreign = TokenService::new(&jwt_config("wrong-secret-key")).unwrap();
        let token = foreign.generate_token(user.as_ref()).unwrap();

        let status = weather_status(state, Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_returns_200() {
        let state = create_test_state_sync();
        let user = state.users().get_user(Some("alice")).await.unwrap();
        let token = state.jwt().generate_token(user.as_ref()).unwrap();

        let status = weather_status(state, Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
