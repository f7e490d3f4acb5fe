//! JWT Auth Shared Library
//!
//! Request and response types shared between the backend and its clients.

pub mod types;

pub use types::*;
