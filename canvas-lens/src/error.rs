//! Unified error handling for the Canvas Lens library
//!
//! Failures split along the boundaries the rest of the crate cares about:
//! network-level transport failures, non-2xx API responses (status + body
//! preserved for the caller), and logical not-found conditions raised by
//! the aggregation services.

use thiserror::Error;

/// The main error type for the Canvas Lens library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Network-level failure reaching the Canvas API (DNS, connect,
    /// timeout, TLS). Never retried by this layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP response from the Canvas API
    #[error("Canvas API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// A requested resource (e.g. a course id) is not in the caller's
    /// accessible set
    #[error("{0}")]
    NotFound(String),

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True when this error is a non-2xx API response with the given status.
    pub fn is_status(&self, status: u16) -> bool {
        matches!(self, Error::Api { status: s, .. } if *s == status)
    }
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_preserves_status_and_body() {
        let err = Error::Api {
            status: 403,
            body: "{\"errors\":[{\"message\":\"unauthorized\"}]}".to_string(),
        };
        assert!(err.is_status(403));
        assert!(!err.is_status(404));
        assert!(err.to_string().contains("HTTP 403"));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[test]
    fn not_found_message_is_unwrapped() {
        let err = Error::NotFound("Course 42 not found or not accessible".to_string());
        assert_eq!(err.to_string(), "Course 42 not found or not accessible");
    }
}
