//! Token service errors
//!
//! Validation failures are distinguishable here for logging. The HTTP layer
//! collapses all of them into one "unauthenticated" response.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token audience is invalid")]
    InvalidAudience,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token expiry is outside the representable time range")]
    ExpiryOutOfRange,

    #[error("Failed to sign token")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// True for every outcome of validating a presented token.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            TokenError::InvalidInput(_) | TokenError::ExpiryOutOfRange | TokenError::Encoding(_)
        )
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => TokenError::InvalidSignature,
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            ErrorKind::InvalidAudience => TokenError::InvalidAudience,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::MissingRequiredClaim(claim) => match claim.as_str() {
                "iss" => TokenError::InvalidIssuer,
                "aud" => TokenError::InvalidAudience,
                "exp" => TokenError::Expired,
                _ => TokenError::Malformed,
            },
            _ => TokenError::Malformed,
        }
    }
}
