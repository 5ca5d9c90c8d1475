//! TMDB movie listings: trending, top rated and title search.

use std::fmt;

use serde::Deserialize;

use crate::config::{non_blank, SourceConfig};
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// Which TMDB listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieFeed {
    /// Trending this week. The query is ignored.
    #[default]
    Trending,
    /// Top rated of all time. The query is ignored.
    TopRated,
    /// Title search.
    Search,
}

impl fmt::Display for MovieFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trending => write!(f, "trending"),
            Self::TopRated => write!(f, "top rated"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// A movie summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB id.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Plot overview.
    #[serde(default)]
    pub overview: String,
    /// Release date (`YYYY-MM-DD`), if known.
    pub release_date: Option<String>,
    /// Average vote out of 10.
    #[serde(default)]
    pub vote_average: f64,
    /// Poster path relative to the image CDN.
    pub poster_path: Option<String>,
    /// Absolute poster URL, filled in by the source.
    #[serde(skip)]
    pub poster_url: Option<String>,
}

impl Movie {
    /// Release year, if the date is present.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| !y.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct MovieList {
    #[serde(default)]
    results: Vec<Movie>,
}

/// Movies from one TMDB listing. Needs a TMDB key.
///
/// An empty listing is reported as [`SourceError::NotFound`].
#[derive(Debug, Clone)]
pub struct MovieSearch {
    http: HttpClient,
    base: String,
    images: String,
    api_key: Option<String>,
    feed: MovieFeed,
}

impl MovieSearch {
    /// Create a source for `feed`.
    pub fn new(http: HttpClient, config: &SourceConfig, feed: MovieFeed) -> Self {
        Self {
            http,
            base: config.endpoints.tmdb.clone(),
            images: config.endpoints.tmdb_images.clone(),
            api_key: non_blank(config.keys.tmdb.as_ref()),
            feed,
        }
    }

    /// The listing this source fetches.
    pub const fn feed(&self) -> MovieFeed {
        self.feed
    }
}

impl SearchSource for MovieSearch {
    type Output = Vec<Movie>;

    fn name(&self) -> &'static str {
        "movies"
    }

    fn search(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingApiKey("tmdb"))?;

        let list: MovieList = match self.feed {
            MovieFeed::Trending => self.http.get_json(
                &format!("{}/trending/movie/week", self.base),
                &[("api_key", key)],
                "trending movies",
            )?,
            MovieFeed::TopRated => self.http.get_json(
                &format!("{}/movie/top_rated", self.base),
                &[("api_key", key)],
                "top rated movies",
            )?,
            MovieFeed::Search => self.http.get_json(
                &format!("{}/search/movie", self.base),
                &[("api_key", key), ("query", query)],
                "movies",
            )?,
        };

        if list.results.is_empty() {
            return Err(SourceError::NotFound {
                what: format!("movies for \"{query}\""),
            });
        }

        Ok(list
            .results
            .into_iter()
            .map(|mut movie| {
                movie.poster_url = movie
                    .poster_path
                    .as_ref()
                    .map(|path| format!("{}{path}", self.images));
                movie
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_movie_list() {
        let list: MovieList = serde_json::from_str(
            r#"{"page":1,"results":[{"id":27205,"title":"Inception","overview":"A thief...","release_date":"2010-07-15","vote_average":8.4,"poster_path":"/inception.jpg"}]}"#,
        )
        .unwrap();
        let movie = &list.results[0];
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year(), Some("2010"));
        assert_eq!(movie.poster_url, None);
    }

    #[test]
    fn test_year_without_date() {
        let movie: Movie =
            serde_json::from_str(r#"{"id":1,"title":"Untitled","release_date":""}"#).unwrap();
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_missing_key() {
        let config = SourceConfig::default();
        let source = MovieSearch::new(HttpClient::new(&config), &config, MovieFeed::Search);
        assert!(matches!(
            source.search("heat"),
            Err(SourceError::MissingApiKey("tmdb"))
        ));
    }
}
