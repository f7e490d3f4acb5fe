//! User lookup
//!
//! Handlers depend on the `UserRepository` trait only, so a real store can
//! replace the in-memory one without touching token logic.

use crate::auth::PasswordService;
use crate::config::SeedUserConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// A provisioned user. Only the password hash is ever stored.
#[derive(Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Case-sensitive exact match. `Ok(None)` when nobody has that name.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;
}

/// Fixed set of users held in memory, immutable after construction
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUserRepository {
    pub fn new(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// Provision the configured seed user, hashing its password
    pub fn from_seed(seed: &SeedUserConfig) -> Result<Self> {
        let password_hash = PasswordService::hash(seed.password()?)?;

        Ok(Self::new([UserRecord {
            id: seed.id,
            username: seed.username.clone(),
            email: seed.email.clone(),
            role: seed.role.clone(),
            password_hash,
        }]))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.get(username).cloned())
    }
}
