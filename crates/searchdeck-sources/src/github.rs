//! GitHub profile lookup: user details plus recently updated repositories.

use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// Public profile of a GitHub user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GithubUser {
    /// Login handle.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: String,
    /// Profile bio.
    pub bio: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: u64,
    /// Follower count.
    #[serde(default)]
    pub followers: u64,
    /// Following count.
    #[serde(default)]
    pub following: u64,
}

/// A repository summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repo {
    /// Repository name.
    pub name: String,
    /// Repository page URL.
    #[serde(default)]
    pub html_url: String,
    /// Description.
    pub description: Option<String>,
    /// Primary language.
    pub language: Option<String>,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: String,
}

/// A user together with their repositories, most recently updated first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubProfile {
    /// The user.
    pub user: GithubUser,
    /// Their repositories.
    pub repos: Vec<Repo>,
}

/// Looks up a GitHub user by login.
#[derive(Debug, Clone)]
pub struct GithubProfiles {
    http: HttpClient,
    base: String,
}

impl GithubProfiles {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.github.clone(),
        }
    }
}

impl SearchSource for GithubProfiles {
    type Output = GithubProfile;

    fn name(&self) -> &'static str {
        "github"
    }

    fn search(&self, query: &str) -> Result<GithubProfile, SourceError> {
        let login = query.trim();
        let what = format!("user \"{login}\"");
        let user_url = format!("{}/users/{}", self.base, urlencoding::encode(login));

        let user: GithubUser = self.http.get_json(&user_url, &[], &what)?;
        let repos = self.http.get_json(
            &format!("{user_url}/repos"),
            &[("sort", "updated"), ("direction", "desc")],
            &what,
        )?;
        Ok(GithubProfile { user, repos })
    }
}
