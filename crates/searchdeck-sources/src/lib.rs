//! Third-party API sources for searchdeck.
//!
//! Each source wraps one REST endpoint and answers a single query with a
//! typed payload:
//!
//! | Source | API |
//! |---|---|
//! | [`PostSearch`], [`PagedPostSearch`], [`UserSearch`], [`CommentSearch`] | JSONPlaceholder |
//! | [`WordSuggest`] | Datamuse |
//! | [`GithubProfiles`] | GitHub REST |
//! | [`CoinMarkets`], [`CoinChart`] | CoinGecko |
//! | [`WeatherLookup`] | OpenWeatherMap |
//! | [`MovieSearch`] | TMDB |
//! | [`RandomJoke`] | Official Joke API |
//! | [`PokemonLookup`] | PokeAPI |
//! | [`NewsHeadlines`] | NewsAPI |
//!
//! Sources are blocking; [`fetcher`] bridges one into the async
//! [`Fetch`] seam the query controller expects by running each call on the
//! blocking thread pool.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use searchdeck_core::{ControllerConfig, QueryController};
//! use searchdeck_sources::{fetcher, HttpClient, SourceConfig, WordSuggest};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SourceConfig::default();
//! let http = HttpClient::new(&config);
//! let source = Arc::new(WordSuggest::new(http, &config));
//! let controller = QueryController::new(fetcher(source), ControllerConfig::default());
//! controller.submit_query("rus");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod coins;
pub mod config;
pub mod error;
pub mod github;
pub mod http;
pub mod jokes;
pub mod movies;
pub mod news;
pub mod placeholder;
pub mod pokemon;
pub mod weather;
pub mod words;

use std::sync::Arc;

use searchdeck_core::{Fetch, FetchError};

pub use coins::{format_market_cap, ChartPoint, Coin, CoinChart, CoinMarkets};
pub use config::{ApiKeys, Endpoints, SourceConfig};
pub use error::SourceError;
pub use github::{GithubProfile, GithubProfiles, GithubUser, Repo};
pub use http::HttpClient;
pub use jokes::{Joke, RandomJoke};
pub use movies::{Movie, MovieFeed, MovieSearch};
pub use news::{Article, NewsCategory, NewsHeadlines};
pub use placeholder::{
    sort_users, Comment, CommentSearch, PagedPostSearch, Post, PostPage, PostSearch, User,
    UserSearch, UserSort,
};
pub use pokemon::{Pokemon, PokemonLookup};
pub use weather::{Weather, WeatherLookup};
pub use words::{Suggestion, WordSuggest};

/// A blocking data source answering one query at a time.
pub trait SearchSource: Send + Sync + 'static {
    /// Payload produced for a query.
    type Output: Send + 'static;

    /// Short source name, used in logs.
    fn name(&self) -> &'static str;

    /// Fetch results for `query`.
    fn search(&self, query: &str) -> Result<Self::Output, SourceError>;
}

/// Adapt a blocking source into a fetch function for the query controller.
///
/// Each call runs on Tokio's blocking pool, so concurrent calls never block
/// the controller.
pub fn fetcher<S: SearchSource>(source: Arc<S>) -> impl Fetch<S::Output> {
    move |query: String| {
        let source = Arc::clone(&source);
        async move {
            let name = source.name();
            tokio::task::spawn_blocking(move || {
                tracing::debug!(source = source.name(), query = %query, "fetching");
                source.search(&query)
            })
            .await
            .map_err(|e| FetchError::Unknown(format!("{name} fetch task failed: {e}")))?
            .map_err(FetchError::from)
        }
    }
}
