//! Stub of the external posts API.
//!
//! # Design
//! Replaces the real upstream (a jsonplaceholder-style JSON endpoint) in
//! tests and local runs. Integration tests bind it to a random port and
//! point the fetcher at it; `app_with_posts` and `app_with_response` let a
//! test script the upstream's behavior, including malformed payloads.
//! `SourcePost` mirrors the upstream wire schema (camelCase keys, no
//! status field) and is defined apart from the core crate's `Post`, so
//! schema drift between the two shows up in integration tests.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// A post exactly as the upstream serves it: `{userId, id, title, body}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePost {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

type Posts = Arc<Vec<SourcePost>>;

/// The default upstream payload: three posts from one author.
pub fn fixture_posts() -> Vec<SourcePost> {
    (1..=3)
        .map(|n| SourcePost {
            user_id: 1,
            id: n,
            title: format!("title{n}"),
            body: format!("body{n}"),
        })
        .collect()
}

/// Router serving the default fixture payload on `GET /posts`.
pub fn app() -> Router {
    app_with_posts(fixture_posts())
}

/// Router serving a caller-chosen payload on `GET /posts`.
pub fn app_with_posts(posts: Vec<SourcePost>) -> Router {
    let posts: Posts = Arc::new(posts);
    Router::new()
        .route("/posts", get(list_posts))
        .with_state(posts)
}

/// Router answering `GET /posts` with a canned status and raw body, for
/// failure-path tests (malformed JSON, upstream 5xx). Invalid status codes
/// collapse to 500.
pub fn app_with_response(status: u16, body: &str) -> Router {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = body.to_string();
    Router::new().route(
        "/posts",
        get(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    )
}

/// Serve the default app on `listener`.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Bind `app` to a random localhost port and serve it in the background;
/// returns the bound address. The server task runs until the runtime drops.
pub async fn start(app: Router) -> Result<std::net::SocketAddr, std::io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

async fn list_posts(State(posts): State<Posts>) -> Json<Vec<SourcePost>> {
    Json(posts.as_ref().clone())
}
