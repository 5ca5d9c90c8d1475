//! Official Joke API.

use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// A two-part joke.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Joke {
    /// Joke id.
    pub id: u64,
    /// Category (`general`, `programming`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Setup line.
    pub setup: String,
    /// Punchline.
    pub punchline: String,
}

/// Fetches a random joke. The query is ignored.
#[derive(Debug, Clone)]
pub struct RandomJoke {
    http: HttpClient,
    base: String,
}

impl RandomJoke {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.jokes.clone(),
        }
    }
}

impl SearchSource for RandomJoke {
    type Output = Joke;

    fn name(&self) -> &'static str {
        "jokes"
    }

    fn search(&self, _query: &str) -> Result<Joke, SourceError> {
        let url = format!("{}/random_joke", self.base);
        self.http.get_json(&url, &[], "joke")
    }
}
