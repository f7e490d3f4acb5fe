//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup and read-only afterwards;
//! all fields are cheap to clone.

use crate::auth::{Clock, SystemClock, TokenService};
use crate::config::AppConfig;
use crate::repositories::{InMemoryUserRepository, UserRepository};
use crate::services::UserService;
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token service with pre-computed keys
    pub jwt: TokenService,
    /// Credential verifier
    pub users: UserService,
}

impl AppState {
    /// Create a new application state backed by the system clock
    ///
    /// Fails when the signing secret or seed user password is missing.
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same as `new`, with a custom time source for token operations
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let users = Arc::new(InMemoryUserRepository::from_seed(&config.seed_user)?);
        Self::from_parts(config, users, clock)
    }

    /// Assemble state around an arbitrary user repository
    pub fn from_parts(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let jwt = TokenService::with_clock(&config.jwt, clock)?;

        Ok(Self {
            config: Arc::new(config),
            jwt,
            users: UserService::new(users),
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token service
    #[inline]
    pub fn jwt(&self) -> &TokenService {
        &self.jwt
    }

    /// Get a reference to the credential verifier
    #[inline]
    pub fn users(&self) -> &UserService {
        &self.users
    }
}
