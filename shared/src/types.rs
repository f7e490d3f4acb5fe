//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Credential exchange request
///
/// Both fields are optional on the wire: a missing username or password is
/// answered with 401 rather than a deserialization error.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Credential exchange response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Weather Types
// ============================================================================

/// A single day's forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: DateTime<Utc>,
    pub temperature_c: i32,
    pub temperature_f: i32,
}

impl WeatherForecast {
    pub fn new(date: DateTime<Utc>, temperature_c: i32) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: 32 + (f64::from(temperature_c) / 0.5556) as i32,
        }
    }
}
