//! Common test utilities for integration tests
//!
//! Builds the real router around a manual clock so expiry can be driven
//! without sleeping.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jwt_auth_backend::{
    auth::ManualClock,
    config::{AppConfig, JwtConfig, SeedUserConfig, ServerConfig},
    routes,
    state::AppState,
};
use secrecy::SecretString;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const SEED_USER_ID: &str = "6f1c3a52-0c4b-4d8e-9a57-2f0d6b8e4c11";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let state = AppState::with_clock(config, clock.clone()).expect("Failed to build state");
        let app = routes::create_router(state);

        Self { app, clock }
    }

    pub fn advance(&self, secs: i64) {
        self.clock.advance(Duration::seconds(secs));
    }

    /// Make a GET request, optionally with a bearer token
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, HeaderMap, String) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Exchange credentials, returning the token on success
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let body = serde_json::json!({ "username": username, "password": password });
        let (status, _, response) = self.post("/v1/token", &body.to_string()).await;
        if status != StatusCode::OK {
            return None;
        }
        let response: serde_json::Value = serde_json::from_str(&response).unwrap();
        response["token"].as_str().map(str::to_string)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, headers, body_str)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: Some(SecretString::new(
                "test-secret-key-for-testing-only-32chars".to_string(),
            )),
            issuer: "jwt-auth".to_string(),
            audience: "jwt-auth-clients".to_string(),
            token_lifetime_secs: 300,
        },
        seed_user: SeedUserConfig {
            id: Uuid::parse_str(SEED_USER_ID).unwrap(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: "Administrator".to_string(),
            password: Some(SecretString::new("correct".to_string())),
        },
    }
}
