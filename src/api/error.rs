//! Transport-level failures.
//!
//! A non-200 status is not an error here: it is a valid [`ApiResponse`]
//! that the reconciler treats as a failed toggle.
//!
//! [`ApiResponse`]: super::ApiResponse

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection refused, DNS failure, TLS error and the like
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Path and query did not form a valid URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Short machine-readable kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ClientBuild(_) => "client_build",
            ApiError::Connection { .. } => "connection_error",
            ApiError::Timeout { .. } => "timeout",
            ApiError::InvalidUrl(_) => "invalid_url",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = ApiError::Timeout { duration: 30 };
        assert_eq!(err.to_string(), "Request timeout after 30s");
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn test_invalid_url_kind() {
        assert_eq!(ApiError::InvalidUrl("bad".into()).kind(), "invalid_url");
    }
}
