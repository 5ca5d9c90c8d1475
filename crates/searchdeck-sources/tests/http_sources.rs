//! End-to-end tests for the HTTP sources against a local one-shot responder.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use searchdeck_core::{ControllerConfig, FetchError, QueryController, ResultState};
use searchdeck_sources::{
    fetcher, CommentSearch, GithubProfiles, HttpClient, PagedPostSearch, PokemonLookup,
    SearchSource, SourceConfig, SourceError, WordSuggest,
};

/// Serve `responses` in order, one per connection, and return the request
/// lines that were received.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            requests.push(request_line.trim_end().to_string());
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }

            let reason = if status == 200 { "OK" } else { "Not Found" };
            write!(
                stream,
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
        }
        requests
    });

    (base, handle)
}

fn config_for(base: &str) -> SourceConfig {
    SourceConfig {
        endpoints: searchdeck_sources::Endpoints::all_at(base),
        timeout_secs: 5,
        ..SourceConfig::default()
    }
}

#[test]
fn test_word_suggest_sends_prefix() {
    let (base, server) = serve(vec![(200, r#"[{"word":"rust","score":100}]"#)]);
    let config = config_for(&base);
    let source = WordSuggest::new(HttpClient::new(&config), &config);

    let words = source.search("rus").unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "rust");

    let requests = server.join().unwrap();
    assert_eq!(requests, vec!["GET /sug?s=rus HTTP/1.1"]);
}

#[test]
fn test_paged_posts_requests_selected_page() {
    let (base, server) = serve(vec![(200, r#"[{"id":11,"userId":2,"title":"t","body":"b"}]"#)]);
    let config = config_for(&base);
    let source = PagedPostSearch::new(HttpClient::new(&config), &config);
    source.set_page(2);

    let page = source.search("qui").unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.posts[0].id, 11);
    assert!(!page.has_more());

    let requests = server.join().unwrap();
    assert_eq!(requests, vec!["GET /posts?q=qui&_page=2&_limit=10 HTTP/1.1"]);
}

#[test]
fn test_empty_comments_are_not_found() {
    let (base, server) = serve(vec![(200, "[]")]);
    let config = config_for(&base);
    let source = CommentSearch::new(HttpClient::new(&config), &config);

    let err = source.search("nobody@example.com").unwrap_err();
    assert!(matches!(err, SourceError::NotFound { .. }));
    assert!(matches!(FetchError::from(err), FetchError::NotFound(_)));
    server.join().unwrap();
}

#[test]
fn test_github_404_is_not_found() {
    let (base, server) = serve(vec![(404, r#"{"message":"Not Found"}"#)]);
    let config = config_for(&base);
    let source = GithubProfiles::new(HttpClient::new(&config), &config);

    let err = source.search("no-such-user").unwrap_err();
    assert_eq!(err.to_string(), "user \"no-such-user\" not found");

    let requests = server.join().unwrap();
    assert_eq!(requests, vec!["GET /users/no-such-user HTTP/1.1"]);
}

#[test]
fn test_github_fetches_user_then_repos() {
    let (base, server) = serve(vec![
        (200, r#"{"login":"octocat","name":"The Octocat","bio":null,"location":null,"public_repos":2,"followers":1,"following":0}"#),
        (200, r#"[{"name":"hello","description":null,"language":null,"stargazers_count":3,"updated_at":"2024-01-01T00:00:00Z"}]"#),
    ]);
    let config = config_for(&base);
    let source = GithubProfiles::new(HttpClient::new(&config), &config);

    let profile = source.search("octocat").unwrap();
    assert_eq!(profile.user.name.as_deref(), Some("The Octocat"));
    assert_eq!(profile.repos[0].name, "hello");

    let requests = server.join().unwrap();
    assert_eq!(
        requests,
        vec![
            "GET /users/octocat HTTP/1.1",
            "GET /users/octocat/repos?sort=updated&direction=desc HTTP/1.1",
        ]
    );
}

#[test]
fn test_malformed_body_is_decode_error() {
    let (base, server) = serve(vec![(200, r#"{"unexpected":true}"#)]);
    let config = config_for(&base);
    let source = PokemonLookup::new(HttpClient::new(&config), &config);

    let err = source.search("Pikachu").unwrap_err();
    assert!(matches!(err, SourceError::Decode { .. }));

    let requests = server.join().unwrap();
    assert_eq!(requests, vec!["GET /pokemon/pikachu HTTP/1.1"]);
}

#[test]
fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = config_for(&format!("http://127.0.0.1:{port}"));
    let source = WordSuggest::new(HttpClient::new(&config), &config);

    let err = source.search("rus").unwrap_err();
    assert!(matches!(err, SourceError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn test_controller_over_http_source() {
    let (base, server) = serve(vec![(200, r#"[{"word":"rustacean","score":1}]"#)]);
    let config = config_for(&base);
    let source = Arc::new(WordSuggest::new(HttpClient::new(&config), &config));
    let controller = QueryController::new(
        fetcher(source),
        ControllerConfig::default().with_debounce(std::time::Duration::from_millis(20)),
    );

    controller.submit_query("rusta");
    let mut states = controller.subscribe();
    let settled = states
        .wait_for(|s| matches!(s, ResultState::Success { .. } | ResultState::Failure { .. }))
        .await
        .unwrap()
        .clone();

    assert_eq!(settled.query(), Some("rusta"));
    assert_eq!(settled.data().map(|w| w[0].word.as_str()), Some("rustacean"));
    server.join().unwrap();
}

#[tokio::test]
async fn test_controller_reports_network_failure() {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = config_for(&format!("http://127.0.0.1:{port}"));
    let source = Arc::new(WordSuggest::new(HttpClient::new(&config), &config));
    let controller = QueryController::new(fetcher(source), ControllerConfig::default());

    controller.search_now("rus");
    let mut states = controller.subscribe();
    let settled = states
        .wait_for(|s| s.is_settled())
        .await
        .unwrap()
        .clone();

    assert!(matches!(settled.error(), Some(FetchError::Network(_))));
}
