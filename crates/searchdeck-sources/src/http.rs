//! Shared blocking HTTP client.

use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::config::SourceConfig;
use crate::error::SourceError;

/// Thin wrapper over a [`ureq::Agent`] that speaks JSON and maps failures
/// onto [`SourceError`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    agent: Agent,
    user_agent: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &SourceConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build();
        Self {
            agent: Agent::new_with_config(agent_config),
            user_agent: config.user_agent.clone(),
        }
    }

    /// GET `url` with `query` parameters and decode the JSON body.
    ///
    /// `what` names the looked-up resource in the [`SourceError::NotFound`]
    /// message when the API answers 404.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, SourceError> {
        let mut request = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "application/json");
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        tracing::trace!(url, ?query, "GET");
        let mut response = request.call().map_err(|e| map_error(url, what, &e))?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| map_error(url, what, &e))?;

        serde_json::from_str(&body).map_err(|e| SourceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Classify a ureq failure.
pub(crate) fn map_error(url: &str, what: &str, err: &ureq::Error) -> SourceError {
    match err {
        ureq::Error::StatusCode(404) => SourceError::NotFound {
            what: what.to_string(),
        },
        ureq::Error::StatusCode(status) => SourceError::Status {
            url: url.to_string(),
            status: *status,
        },
        ureq::Error::Io(_)
        | ureq::Error::Timeout(_)
        | ureq::Error::HostNotFound
        | ureq::Error::ConnectionFailed => SourceError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        },
        _ => SourceError::Http(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = map_error("http://x/users/ghost", "user \"ghost\"", &ureq::Error::StatusCode(404));
        assert!(matches!(err, SourceError::NotFound { ref what } if what == "user \"ghost\""));

        let err = map_error("http://x", "thing", &ureq::Error::StatusCode(503));
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
    }

    #[test]
    fn test_transport_mapping() {
        let err = map_error("http://x", "thing", &ureq::Error::HostNotFound);
        assert!(matches!(err, SourceError::Transport { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = map_error("http://x", "thing", &ureq::Error::Io(io));
        assert!(matches!(err, SourceError::Transport { .. }));
    }
}
