//! Request tokens for stale-response detection.
//!
//! Every request the controller dispatches carries the token minted for it.
//! When the response arrives, it is only applied if that token is still the
//! latest one; anything older is a stale response and is dropped.

use std::fmt;

/// Tag identifying one dispatched request.
///
/// Tokens are ordered by minting time within a single [`TokenCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token source owned by one controller.
#[derive(Debug, Default)]
pub struct TokenCounter {
    latest: u64,
}

impl TokenCounter {
    /// Create a counter. No token has been minted yet.
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Mint a fresh token, making every earlier token stale.
    pub fn mint(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Advance the counter without handing out a token.
    ///
    /// Used when no new request is dispatched but outstanding ones must
    /// still be ignored (blank query, disposal).
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// The token currently considered fresh, if the counter has moved.
    pub const fn latest(&self) -> Option<RequestToken> {
        if self.latest == 0 {
            None
        } else {
            Some(RequestToken(self.latest))
        }
    }

    /// Check whether `token` is still the latest.
    pub const fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_monotonic() {
        let mut counter = TokenCounter::new();
        assert_eq!(counter.latest(), None);

        let first = counter.mint();
        let second = counter.mint();
        assert!(second > first);
        assert_eq!(counter.latest(), Some(second));
    }

    #[test]
    fn test_older_token_is_stale() {
        let mut counter = TokenCounter::new();
        let first = counter.mint();
        assert!(counter.is_latest(first));

        let second = counter.mint();
        assert!(!counter.is_latest(first));
        assert!(counter.is_latest(second));
    }

    #[test]
    fn test_invalidate_stales_everything() {
        let mut counter = TokenCounter::new();
        let token = counter.mint();
        counter.invalidate();
        assert!(!counter.is_latest(token));
        assert_eq!(token.to_string(), "#1");
    }
}
