//! Data access layer

pub mod user;

pub use user::{InMemoryUserRepository, UserRecord, UserRepository};
