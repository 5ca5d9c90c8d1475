//! Source configuration: endpoints, timeouts and API keys.

use std::time::Duration;

use serde::Deserialize;

/// Base URLs for every API. Overridable so tests can point at a local server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// JSONPlaceholder.
    pub placeholder: String,
    /// Datamuse.
    pub datamuse: String,
    /// GitHub REST API.
    pub github: String,
    /// CoinGecko v3.
    pub coingecko: String,
    /// OpenWeatherMap.
    pub openweather: String,
    /// TMDB v3.
    pub tmdb: String,
    /// TMDB poster images.
    pub tmdb_images: String,
    /// Official Joke API.
    pub jokes: String,
    /// PokeAPI v2.
    pub pokeapi: String,
    /// NewsAPI v2.
    pub newsapi: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            placeholder: "https://jsonplaceholder.typicode.com".to_string(),
            datamuse: "https://api.datamuse.com".to_string(),
            github: "https://api.github.com".to_string(),
            coingecko: "https://api.coingecko.com/api/v3".to_string(),
            openweather: "https://api.openweathermap.org/data/2.5".to_string(),
            tmdb: "https://api.themoviedb.org/3".to_string(),
            tmdb_images: "https://image.tmdb.org/t/p/w500".to_string(),
            jokes: "https://official-joke-api.appspot.com".to_string(),
            pokeapi: "https://pokeapi.co/api/v2".to_string(),
            newsapi: "https://newsapi.org/v2".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at `base`. Used by tests.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            placeholder: base.clone(),
            datamuse: base.clone(),
            github: base.clone(),
            coingecko: base.clone(),
            openweather: base.clone(),
            tmdb: base.clone(),
            tmdb_images: base.clone(),
            jokes: base.clone(),
            pokeapi: base.clone(),
            newsapi: base,
        }
    }
}

/// API keys for the sources that require one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    /// OpenWeatherMap `appid`.
    pub openweather: Option<String>,
    /// TMDB `api_key`.
    pub tmdb: Option<String>,
    /// NewsAPI `apiKey`.
    pub newsapi: Option<String>,
}

/// Everything a source needs to build requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// API base URLs.
    pub endpoints: Endpoints,
    /// API keys.
    pub keys: ApiKeys,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            keys: ApiKeys::default(),
            timeout_secs: 10,
            user_agent: format!("searchdeck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SourceConfig {
    /// Request timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Treat blank keys as missing.
pub(crate) fn non_blank(key: Option<&String>) -> Option<String> {
    key.map(|k| k.trim()).filter(|k| !k.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SourceConfig =
            serde_json::from_str(r#"{"keys": {"tmdb": "abc"}, "timeout_secs": 3}"#).unwrap();
        assert_eq!(config.keys.tmdb.as_deref(), Some("abc"));
        assert_eq!(config.keys.openweather, None);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_all_at_strips_trailing_slash() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:9000/");
        assert_eq!(endpoints.github, "http://127.0.0.1:9000");
        assert_eq!(endpoints.newsapi, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_blank_key_is_missing() {
        assert_eq!(non_blank(Some(&"  ".to_string())), None);
        assert_eq!(non_blank(Some(&" k ".to_string())), Some("k".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
