//! Credential verification
//!
//! Looks users up through the injected repository and checks presented
//! passwords against stored hashes. Neither passwords nor hashes are logged.

use crate::auth::PasswordService;
use crate::repositories::{UserRecord, UserRepository};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Credential verifier
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Look up a user by exact username. An absent username finds nobody.
    pub async fn get_user(&self, username: Option<&str>) -> Result<Option<UserRecord>> {
        let Some(username) = username else {
            return Ok(None);
        };
        self.users.find_by_username(username).await
    }

    /// See [`PasswordService::is_authenticated`]
    #[inline]
    pub fn is_authenticated(&self, password: Option<&str>, password_hash: Option<&str>) -> bool {
        PasswordService::is_authenticated(password, password_hash)
    }

    /// Resolve and verify a username/password pair
    ///
    /// Returns the user only when both the lookup and the password check
    /// succeed. Hashing runs on the blocking pool.
    pub async fn authenticate(
        &self,
        username: Option<&str>,
        password: Option<String>,
    ) -> Result<Option<UserRecord>> {
        let stored = self.get_user(username).await?;
        let stored_hash = stored.as_ref().map(|user| user.password_hash.clone());

        if !PasswordService::is_authenticated_async(password, stored_hash).await {
            debug!(found = stored.is_some(), "Credential check failed");
            return Ok(None);
        }

        Ok(stored)
    }
}
