//! JWT Auth Backend Library
//!
//! Issues HS256 bearer tokens for valid credentials and gates the protected
//! weather endpoint behind token validation. Modules are exposed for tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
