//! Errors returned by the adoption service client.

use thiserror::Error;

/// Errors that can occur when calling the adoption service.
///
/// Failures are passed to the caller as-is: the client never retries and
/// never translates one failure into another.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the session (missing, expired or refused login).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The service returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A match was requested without any dog ids.
    #[error("Match request needs at least one dog id")]
    EmptyMatchRequest,
}

impl ApiError {
    /// Whether the error means the session is gone and the user must log in again.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
