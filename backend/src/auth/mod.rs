//! Authentication module
//!
//! Provides HS256 bearer tokens and argon2 password verification.

mod clock;
mod error;
mod jwt;
mod middleware;
mod password;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TokenError;
pub use jwt::{Audience, AuthIdentity, Claims, JwtKeys, TokenService};
pub use middleware::AuthUser;
pub use password::PasswordService;
