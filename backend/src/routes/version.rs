//! URL-segment API versioning
//!
//! Routes are mounted under `/:version`, where the segment looks like `v1`
//! or `v1.0`. Unknown versions are refused before any handler logic runs.

use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, HeaderName, HeaderValue},
};
use std::fmt;

/// Versions this service answers to
pub const SUPPORTED_VERSIONS: &[ApiVersion] = &[ApiVersion::V1_0];

/// Response header listing `SUPPORTED_VERSIONS`
pub fn supported_versions_header() -> HeaderName {
    HeaderName::from_static("api-supported-versions")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const V1_0: ApiVersion = ApiVersion { major: 1, minor: 0 };

    /// Parse a `v{major}[.{minor}]` path segment
    pub fn parse(segment: &str) -> Option<Self> {
        let version = segment.strip_prefix('v')?;
        let (major, minor) = match version.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (version, "0"),
        };
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_VERSIONS.contains(self)
    }

    pub fn supported_header_value() -> HeaderValue {
        let list = SUPPORTED_VERSIONS
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        HeaderValue::from_str(&list).unwrap_or_else(|_| HeaderValue::from_static("1.0"))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        ApiVersion::parse(&segment)
            .filter(ApiVersion::is_supported)
            .ok_or(ApiError::UnsupportedApiVersion(segment))
    }
}
