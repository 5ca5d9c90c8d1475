//! NewsAPI top headlines by category.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::{non_blank, SourceConfig};
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// Headline categories offered by the news surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    /// Business.
    Business,
    /// Entertainment.
    Entertainment,
    /// General.
    General,
    /// Health.
    Health,
}

impl NewsCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [
        Self::Business,
        Self::Entertainment,
        Self::General,
        Self::Health,
    ];

    /// The value NewsAPI expects.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Entertainment => "entertainment",
            Self::General => "general",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SourceError::InvalidQuery(format!("unknown news category \"{wanted}\"")))
    }
}

/// Publisher of an article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleSource {
    /// Publisher name.
    #[serde(default)]
    pub name: String,
}

/// A headline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline.
    pub title: String,
    /// Summary.
    pub description: Option<String>,
    /// Article URL.
    #[serde(default)]
    pub url: String,
    /// Publisher.
    pub source: ArticleSource,
    /// Publication time.
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Publication date as `16 Oct 2026`.
    pub fn published_label(&self) -> String {
        self.published_at.format("%d %b %Y").to_string()
    }
}

#[derive(Debug, Deserialize)]
struct Headlines {
    #[serde(default)]
    articles: Vec<Article>,
}

/// US top headlines. The query is a [`NewsCategory`] name. Needs a NewsAPI key.
#[derive(Debug, Clone)]
pub struct NewsHeadlines {
    http: HttpClient,
    base: String,
    api_key: Option<String>,
}

impl NewsHeadlines {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.newsapi.clone(),
            api_key: non_blank(config.keys.newsapi.as_ref()),
        }
    }
}

impl SearchSource for NewsHeadlines {
    type Output = Vec<Article>;

    fn name(&self) -> &'static str {
        "news"
    }

    fn search(&self, query: &str) -> Result<Vec<Article>, SourceError> {
        let category: NewsCategory = query.parse()?;
        let key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingApiKey("newsapi"))?;
        let url = format!("{}/top-headlines", self.base);
        let headlines: Headlines = self.http.get_json(
            &url,
            &[
                ("country", "us"),
                ("category", category.as_str()),
                ("apiKey", key),
            ],
            "headlines",
        )?;
        Ok(headlines.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Health".parse::<NewsCategory>().unwrap(), NewsCategory::Health);
        assert_eq!(" business ".parse::<NewsCategory>().unwrap(), NewsCategory::Business);
        assert!(matches!(
            "sports".parse::<NewsCategory>(),
            Err(SourceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_decode_article() {
        let headlines: Headlines = serde_json::from_str(
            r#"{"status":"ok","totalResults":1,"articles":[{"source":{"id":null,"name":"Reuters"},"title":"Markets rally","description":null,"url":"https://example.com/a","publishedAt":"2024-03-05T14:30:00Z"}]}"#,
        )
        .unwrap();
        let article = &headlines.articles[0];
        assert_eq!(article.source.name, "Reuters");
        assert_eq!(article.published_label(), "05 Mar 2024");
    }
}
