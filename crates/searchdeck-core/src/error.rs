//! Errors reported by fetch functions.

use thiserror::Error;

/// Why a dispatched request failed.
///
/// Fetch functions convert whatever their transport produces into one of
/// these variants; the controller stores it unchanged in
/// [`ResultState::Failure`](crate::ResultState::Failure) and never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The upstream service has nothing matching the query.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other rejection.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Short machine-friendly name of the variant.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::NotFound(_) => "not-found",
            Self::Unknown(_) => "unknown",
        }
    }

    /// The human-readable detail carried by the error.
    pub fn message(&self) -> &str {
        match self {
            Self::Network(msg) | Self::NotFound(msg) | Self::Unknown(msg) => msg,
        }
    }
}
