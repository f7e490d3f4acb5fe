//! JWT token generation and validation
//!
//! Tokens are compact JWS strings signed with HS256 over the configured
//! secret. Keys are derived once at construction and shared behind `Arc`.

use super::clock::{Clock, SystemClock};
use super::error::TokenError;
use crate::config::{ConfigError, JwtConfig};
use crate::repositories::UserRecord;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// `aud` may be a single string or an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Default for Audience {
    fn default() -> Self {
        Audience::Many(Vec::new())
    }
}

/// JWT claims
///
/// `iss`, `aud` and `exp` default when absent so that jsonwebtoken's
/// required-claim check reports which one is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// User identifier
    pub nameid: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: Audience,
    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Identity extracted from a validated token, scoped to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub username: String,
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl TryFrom<Claims> for AuthIdentity {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.nameid).map_err(|_| TokenError::Malformed)?;
        Ok(Self {
            username: claims.sub,
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Issues and validates bearer tokens
///
/// Cloning is cheap: keys, validation rules and clock are all behind `Arc`.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    issuer: Arc<str>,
    audience: Arc<str>,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service backed by the system clock
    ///
    /// Fails with `ConfigError::Missing` when no signing secret is configured.
    /// Call once at startup.
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a token service with a custom time source
    pub fn with_clock(config: &JwtConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let secret = config.signing_secret()?;
        let lifetime = config.token_lifetime()?;

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        // Expiry is checked against `clock` below, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            issuer: Arc::from(config.issuer.as_str()),
            audience: Arc::from(config.audience.as_str()),
            lifetime,
            clock,
        })
    }

    /// Generate a signed token for an already authenticated user
    pub fn generate_token(&self, user: Option<&UserRecord>) -> Result<String, TokenError> {
        let user = user.ok_or(TokenError::InvalidInput("user is required"))?;

        let now = self.clock.now();
        let expires = now
            .checked_add_signed(self.lifetime)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: user.username.clone(),
            nameid: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            iss: self.issuer.to_string(),
            aud: Audience::Single(self.audience.to_string()),
            exp: expires.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, self.keys.encoding())
            .map_err(TokenError::Encoding)
    }

    /// Validate a token and return the identity it carries
    ///
    /// Checks signature (HS256 only), issuer, audience, and that expiry is
    /// strictly after now.
    pub fn validate_token(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)?;
        let claims = token_data.claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        AuthIdentity::try_from(claims)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }
}
