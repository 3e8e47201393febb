//! Error types for Reelscout.
//!
//! This module defines the centralized error type [`ReelscoutError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Reelscout operations.
///
/// Variants fall into three groups: precondition failures detected before any
/// request is issued, transport and HTTP failures reported by the remote API, and
/// ambient failures from configuration and I/O.
///
/// # Examples
///
/// ```
/// use reelscout::ReelscoutError;
///
/// fn require_key(key: Option<&str>) -> Result<&str, ReelscoutError> {
///     key.ok_or(ReelscoutError::MissingCredential)
/// }
///
/// assert!(require_key(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum ReelscoutError {
    /// No API key or access token was configured.
    ///
    /// Raised locally before a request is built, so no network traffic happens.
    #[error("no API credential configured (set TMDB_API_KEY or TMDB_ACCESS_TOKEN)")]
    MissingCredential,

    /// The remote API answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Endpoint path the request was sent to.
        endpoint: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Reelscout operations.
pub type Result<T> = std::result::Result<T, ReelscoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_names_endpoint_and_status() {
        let err = ReelscoutError::Http {
            status: 401,
            endpoint: "/search/movie".to_string(),
        };
        assert_eq!(err.to_string(), "/search/movie returned HTTP 401");
    }

    #[test]
    fn io_errors_convert() {
        let err: ReelscoutError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ReelscoutError::Io(_)));
    }
}
