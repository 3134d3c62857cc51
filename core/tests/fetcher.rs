//! Fetcher tests against a live stub of the source API.
//!
//! Each test starts the stub on a random port and points the fetcher at it.
//! The misbehaving variants (malformed JSON, a 5xx upstream, a dead port)
//! must come back as an empty list rather than an error.

use mock_source::SourcePost;
use post_core::{PostFetcher, Status};

fn fetcher_for(addr: std::net::SocketAddr) -> PostFetcher {
    PostFetcher::new(&format!("http://{addr}"))
}

#[tokio::test]
async fn fetch_decodes_the_fixture_posts() {
    let addr = mock_source::start(mock_source::app()).await.unwrap();

    let posts = fetcher_for(addr).fetch().await;

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].id, 1);
    assert_eq!(posts[0].user_id, 1);
    assert_eq!(posts[0].title, "title1");
    assert_eq!(posts[0].body, "body1");
    assert!(posts.iter().all(|p| p.status == Status::Active));
}

#[tokio::test]
async fn fetch_decodes_a_custom_payload() {
    let app = mock_source::app_with_posts(vec![SourcePost {
        user_id: 9,
        id: 42,
        title: "only one".to_string(),
        body: "post".to_string(),
    }]);
    let addr = mock_source::start(app).await.unwrap();

    let posts = fetcher_for(addr).fetch().await;

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 42);
    assert_eq!(posts[0].user_id, 9);
}

#[tokio::test]
async fn fetch_of_empty_source_returns_empty() {
    let addr = mock_source::start(mock_source::app_with_posts(Vec::new()))
        .await
        .unwrap();

    assert!(fetcher_for(addr).fetch().await.is_empty());
}

#[tokio::test]
async fn fetch_from_unreachable_host_returns_empty() {
    // Bind then drop a listener so the port is known to refuse connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(fetcher_for(addr).fetch().await.is_empty());
}

#[tokio::test]
async fn fetch_of_malformed_body_returns_empty() {
    let addr = mock_source::start(mock_source::app_with_response(200, "not json"))
        .await
        .unwrap();

    assert!(fetcher_for(addr).fetch().await.is_empty());
}

#[tokio::test]
async fn fetch_of_server_error_returns_empty() {
    let addr = mock_source::start(mock_source::app_with_response(500, "boom"))
        .await
        .unwrap();

    assert!(fetcher_for(addr).fetch().await.is_empty());
}
