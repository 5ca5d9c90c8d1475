//! Datamuse word suggestions.

use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// A suggested completion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Relevance score; higher is better.
    #[serde(default)]
    pub score: u64,
}

/// Word completions for a prefix.
#[derive(Debug, Clone)]
pub struct WordSuggest {
    http: HttpClient,
    base: String,
}

impl WordSuggest {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.datamuse.clone(),
        }
    }
}

impl SearchSource for WordSuggest {
    type Output = Vec<Suggestion>;

    fn name(&self) -> &'static str {
        "words"
    }

    fn search(&self, query: &str) -> Result<Vec<Suggestion>, SourceError> {
        let url = format!("{}/sug", self.base);
        self.http.get_json(&url, &[("s", query)], "suggestions")
    }
}
