//! Source error types.

use searchdeck_core::FetchError;
use thiserror::Error;

/// Errors raised while talking to a third-party API.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request never got a response (DNS, connect, timeout, I/O).
    #[error("transport error for {url}: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport failure description.
        message: String,
    },

    /// The API answered 404.
    #[error("{what} not found")]
    NotFound {
        /// What was looked up, for the user-facing message.
        what: String,
    },

    /// The API answered with another non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder message.
        message: String,
    },

    /// The source needs an API key that was not configured.
    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),

    /// The query cannot be turned into a request.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Any other HTTP client failure.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<SourceError> for FetchError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Transport { .. } => Self::Network(err.to_string()),
            SourceError::NotFound { .. } => Self::NotFound(err.to_string()),
            _ => Self::Unknown(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_mapping() {
        let transport = SourceError::Transport {
            url: "http://localhost".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(matches!(FetchError::from(transport), FetchError::Network(_)));

        let missing = SourceError::NotFound {
            what: "user \"nobody\"".to_string(),
        };
        assert_eq!(
            FetchError::from(missing),
            FetchError::NotFound("user \"nobody\" not found".to_string())
        );

        let status = SourceError::Status {
            url: "http://localhost".to_string(),
            status: 500,
        };
        assert!(matches!(FetchError::from(status), FetchError::Unknown(_)));

        let key = SourceError::MissingApiKey("tmdb");
        assert_eq!(
            FetchError::from(key),
            FetchError::Unknown("no API key configured for tmdb".to_string())
        );
    }
}
