//! Published result state of a search surface.

use crate::error::FetchError;

/// The single current state of a search surface.
///
/// Replaces the loose loading/error/results flags a page would otherwise
/// juggle: every legal combination is one variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultState<T> {
    /// Nothing submitted yet, or the last query was blank.
    #[default]
    Idle,
    /// A request for `query` is in flight.
    Pending {
        /// The query being fetched.
        query: String,
    },
    /// The latest request for `query` returned `data`.
    Success {
        /// The query that produced `data`.
        query: String,
        /// The fetched payload.
        data: T,
    },
    /// The latest request for `query` failed.
    Failure {
        /// The query that failed.
        query: String,
        /// Why it failed.
        reason: FetchError,
    },
}

/// Which of the mutually exclusive views a presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Idle placeholder.
    Placeholder,
    /// Loading indicator.
    Loading,
    /// Error message.
    Error,
    /// "No results" text.
    Empty,
    /// The fetched data.
    Data,
}

impl<T> ResultState<T> {
    /// The query this state belongs to, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { query } | Self::Success { query, .. } | Self::Failure { query, .. } => {
                Some(query)
            }
        }
    }

    /// The payload of a successful fetch.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The failure reason, if the last fetch failed.
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Check if a request is in flight.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Check if the state is settled (not waiting on the network).
    pub const fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Choose the view to render.
    ///
    /// `is_empty` decides whether a successful payload should be shown as
    /// the empty-state text instead of the data view.
    pub fn view(&self, is_empty: impl FnOnce(&T) -> bool) -> View {
        match self {
            Self::Idle => View::Placeholder,
            Self::Pending { .. } => View::Loading,
            Self::Failure { .. } => View::Error,
            Self::Success { data, .. } if is_empty(data) => View::Empty,
            Self::Success { .. } => View::Data,
        }
    }

    /// Map the payload, keeping the rest of the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultState<U> {
        match self {
            Self::Idle => ResultState::Idle,
            Self::Pending { query } => ResultState::Pending { query },
            Self::Success { query, data } => ResultState::Success {
                query,
                data: f(data),
            },
            Self::Failure { query, reason } => ResultState::Failure { query, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state: ResultState<Vec<u8>> = ResultState::default();
        assert_eq!(state, ResultState::Idle);
        assert_eq!(state.query(), None);
        assert_eq!(state.view(Vec::is_empty), View::Placeholder);
    }

    #[test]
    fn test_view_selection() {
        let pending: ResultState<Vec<u8>> = ResultState::Pending {
            query: "rust".to_string(),
        };
        assert_eq!(pending.view(Vec::is_empty), View::Loading);
        assert!(!pending.is_settled());

        let empty = ResultState::Success {
            query: "rust".to_string(),
            data: Vec::<u8>::new(),
        };
        assert_eq!(empty.view(Vec::is_empty), View::Empty);

        let full = ResultState::Success {
            query: "rust".to_string(),
            data: vec![1u8],
        };
        assert_eq!(full.view(Vec::is_empty), View::Data);
        assert_eq!(full.data(), Some(&vec![1u8]));

        let failed: ResultState<Vec<u8>> = ResultState::Failure {
            query: "rust".to_string(),
            reason: FetchError::Network("connection refused".to_string()),
        };
        assert_eq!(failed.view(Vec::is_empty), View::Error);
        assert_eq!(failed.error().map(FetchError::kind), Some("network"));
        assert_eq!(failed.query(), Some("rust"));
    }

    #[test]
    fn test_map_keeps_query() {
        let state = ResultState::Success {
            query: "abc".to_string(),
            data: vec![1, 2, 3],
        };
        let mapped = state.map(|v| v.len());
        assert_eq!(
            mapped,
            ResultState::Success {
                query: "abc".to_string(),
                data: 3
            }
        );
    }
}
