//! JSONPlaceholder sources: posts, paged posts, users and comments.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use searchdeck_core::sort_stable;
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// Page size used by the paged post search.
pub const POSTS_PER_PAGE: u32 = 10;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post id.
    pub id: u64,
    /// Author id.
    #[serde(default)]
    pub user_id: u64,
    /// Title.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub body: String,
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// User id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id.
    pub id: u64,
    /// Post the comment belongs to.
    #[serde(default)]
    pub post_id: u64,
    /// Comment subject.
    pub name: String,
    /// Author email.
    pub email: String,
    /// Comment text.
    #[serde(default)]
    pub body: String,
}

/// One page of a paged post search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    /// 1-based page number.
    pub page: u32,
    /// Posts on this page.
    pub posts: Vec<Post>,
}

impl PostPage {
    /// A full page suggests another one follows.
    pub fn has_more(&self) -> bool {
        self.posts.len() == POSTS_PER_PAGE as usize
    }
}

/// Posts whose title matches the query.
#[derive(Debug, Clone)]
pub struct PostSearch {
    http: HttpClient,
    base: String,
}

impl PostSearch {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.placeholder.clone(),
        }
    }
}

impl SearchSource for PostSearch {
    type Output = Vec<Post>;

    fn name(&self) -> &'static str {
        "posts"
    }

    fn search(&self, query: &str) -> Result<Vec<Post>, SourceError> {
        let url = format!("{}/posts", self.base);
        self.http.get_json(&url, &[("title_like", query)], "posts")
    }
}

/// Full-text post search, one fixed-size page at a time.
///
/// The page requested is whatever [`set_page`](Self::set_page) last stored.
#[derive(Debug)]
pub struct PagedPostSearch {
    http: HttpClient,
    base: String,
    page: AtomicU32,
}

impl PagedPostSearch {
    /// Create the source, starting at page 1.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.placeholder.clone(),
            page: AtomicU32::new(1),
        }
    }

    /// Select the page the next search fetches.
    pub fn set_page(&self, page: u32) {
        self.page.store(page.max(1), AtomicOrdering::SeqCst);
    }

    /// The page the next search fetches.
    pub fn page(&self) -> u32 {
        self.page.load(AtomicOrdering::SeqCst)
    }
}

impl SearchSource for PagedPostSearch {
    type Output = PostPage;

    fn name(&self) -> &'static str {
        "paged-posts"
    }

    fn search(&self, query: &str) -> Result<PostPage, SourceError> {
        let page = self.page();
        let url = format!("{}/posts", self.base);
        let page_param = page.to_string();
        let limit = POSTS_PER_PAGE.to_string();
        let posts = self.http.get_json(
            &url,
            &[("q", query), ("_page", page_param.as_str()), ("_limit", limit.as_str())],
            "posts",
        )?;
        Ok(PostPage { page, posts })
    }
}

/// Users whose name matches the query.
#[derive(Debug, Clone)]
pub struct UserSearch {
    http: HttpClient,
    base: String,
}

impl UserSearch {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.placeholder.clone(),
        }
    }
}

impl SearchSource for UserSearch {
    type Output = Vec<User>;

    fn name(&self) -> &'static str {
        "users"
    }

    fn search(&self, query: &str) -> Result<Vec<User>, SourceError> {
        let url = format!("{}/users", self.base);
        self.http.get_json(&url, &[("name_like", query)], "users")
    }
}

/// Comments whose author email matches the query.
///
/// An empty match is reported as [`SourceError::NotFound`].
#[derive(Debug, Clone)]
pub struct CommentSearch {
    http: HttpClient,
    base: String,
}

impl CommentSearch {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.placeholder.clone(),
        }
    }
}

impl SearchSource for CommentSearch {
    type Output = Vec<Comment>;

    fn name(&self) -> &'static str {
        "comments"
    }

    fn search(&self, query: &str) -> Result<Vec<Comment>, SourceError> {
        let url = format!("{}/comments", self.base);
        let comments: Vec<Comment> =
            self.http
                .get_json(&url, &[("email_like", query)], "comments")?;
        if comments.is_empty() {
            return Err(SourceError::NotFound {
                what: format!("comments for email \"{query}\""),
            });
        }
        Ok(comments)
    }
}

/// Sort order for user results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSort {
    /// Case-insensitive name, ties broken by id.
    #[default]
    Name,
    /// Ascending id.
    Id,
}

/// Sort users in place.
pub fn sort_users(users: &mut [User], order: UserSort) {
    match order {
        UserSort::Name => sort_stable(users, compare_by_name),
        UserSort::Id => sort_stable(users, |a, b| a.id.cmp(&b.id)),
    }
}

fn compare_by_name(a: &User, b: &User) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_decode_post() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[{"userId": 1, "id": 3, "title": "ea molestias", "body": "et iusto"}]"#,
        )
        .unwrap();
        assert_eq!(posts[0].user_id, 1);
        assert_eq!(posts[0].title, "ea molestias");
    }

    #[test]
    fn test_decode_comment() {
        let comments: Vec<Comment> = serde_json::from_str(
            r#"[{"postId": 1, "id": 1, "name": "id labore", "email": "Eliseo@gardner.biz", "body": "laudantium"}]"#,
        )
        .unwrap();
        assert_eq!(comments[0].post_id, 1);
        assert_eq!(comments[0].email, "Eliseo@gardner.biz");
    }

    #[test]
    fn test_sort_users_by_name() {
        let mut users = vec![user(3, "clementine"), user(1, "Bret"), user(2, "antonette")];
        sort_users(&mut users, UserSort::Name);
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["antonette", "Bret", "clementine"]);
    }

    #[test]
    fn test_sort_users_name_ties_by_id() {
        let mut users = vec![user(9, "Kurtis"), user(4, "Kurtis")];
        sort_users(&mut users, UserSort::Name);
        assert_eq!(users[0].id, 4);
    }

    #[test]
    fn test_sort_users_by_id() {
        let mut users = vec![user(3, "a"), user(1, "b"), user(2, "c")];
        sort_users(&mut users, UserSort::Id);
        let ids: Vec<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_page_has_more() {
        let post = Post {
            id: 1,
            user_id: 1,
            title: String::new(),
            body: String::new(),
        };
        let full = PostPage {
            page: 1,
            posts: vec![post.clone(); 10],
        };
        assert!(full.has_more());
        let short = PostPage {
            page: 2,
            posts: vec![post; 3],
        };
        assert!(!short.has_more());
    }

    #[test]
    fn test_paged_search_clamps_page() {
        let config = SourceConfig::default();
        let source = PagedPostSearch::new(HttpClient::new(&config), &config);
        assert_eq!(source.page(), 1);
        source.set_page(0);
        assert_eq!(source.page(), 1);
        source.set_page(4);
        assert_eq!(source.page(), 4);
    }
}
