//! Configuration management for the JWT auth backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: JWTAUTH__)
//!
//! The signing secret has no default. A process without one must not start.

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Default token lifetime: five minutes, no refresh.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 300;

/// Upper bound on token lifetime. There is no refresh flow, but a day is
/// already far past "short-lived".
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 86_400;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Startup-time configuration errors. All of these are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration missing: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to load configuration")]
    Load(#[from] config::ConfigError),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub seed_user: SeedUserConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<SecretString>,
    pub issuer: String,
    pub audience: String,
    #[serde(default = "default_token_lifetime_secs")]
    pub token_lifetime_secs: i64,
}

fn default_token_lifetime_secs() -> i64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

impl JwtConfig {
    /// The signing secret as raw bytes. Absent and empty are both missing.
    pub fn signing_secret(&self) -> Result<&[u8], ConfigError> {
        self.secret
            .as_ref()
            .map(|s| s.expose_secret().as_bytes())
            .filter(|bytes| !bytes.is_empty())
            .ok_or(ConfigError::Missing("jwt.secret"))
    }

    /// The token lifetime, in `1..=MAX_TOKEN_LIFETIME_SECS` seconds
    pub fn token_lifetime(&self) -> Result<Duration, ConfigError> {
        (1..=MAX_TOKEN_LIFETIME_SECS)
            .contains(&self.token_lifetime_secs)
            .then(|| Duration::try_seconds(self.token_lifetime_secs))
            .flatten()
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "jwt.token_lifetime_secs must be between 1 and {}",
                    MAX_TOKEN_LIFETIME_SECS
                ))
            })
    }
}

/// The single statically provisioned user
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUserConfig {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl SeedUserConfig {
    pub fn password(&self) -> Result<&str, ConfigError> {
        self.password
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::Missing("seed_user.password"))
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with JWTAUTH__ prefix
    pub fn load() -> Result<Self, ConfigError> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = Self::builder()?
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., JWTAUTH__JWT__SECRET=... sets jwt.secret
            .add_source(config::Environment::with_prefix("JWTAUTH").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder pre-populated with the in-code defaults
    pub(crate) fn builder(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("jwt.issuer", "jwt-auth")?
            .set_default("jwt.audience", "jwt-auth-clients")?
            .set_default("jwt.token_lifetime_secs", DEFAULT_TOKEN_LIFETIME_SECS)?
            .set_default("seed_user.id", "6f1c3a52-0c4b-4d8e-9a57-2f0d6b8e4c11")?
            .set_default("seed_user.username", "alice")?
            .set_default("seed_user.email", "alice@example.com")?
            .set_default("seed_user.role", "Administrator")?)
    }

    /// Checks that hold in every environment
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.signing_secret()?;
        self.seed_user.password()?;
        self.jwt.token_lifetime()?;

        if !self.seed_user.email.validate_email() {
            return Err(ConfigError::Invalid(
                "seed_user.email is not a valid email address".to_string(),
            ));
        }
        Ok(())
    }

    /// Stricter checks for production deployment
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        let secret = self.jwt.signing_secret()?;
        if secret.len() < MIN_PRODUCTION_SECRET_LEN
            || secret.windows(11).any(|w| w == b"development")
        {
            return Err(ConfigError::Invalid(format!(
                "jwt.secret must be at least {} bytes and not contain 'development'",
                MIN_PRODUCTION_SECRET_LEN
            )));
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
