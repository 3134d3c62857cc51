//! HTTP surface of the post sync service.
//!
//! # Design
//! Four routes, each a thin translation onto a `PostService` call. The
//! response policy lives here: `NotFound` maps to 404 on the update path
//! and storage failures map to 500. `/callRestGet` answers 200 even when
//! the source is unreachable, since a failed fetch reconciles as an empty
//! batch. Handlers live in the lib so tests can drive the router without
//! a socket.

pub mod config;
pub mod scheduler;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use post_core::{Post, PostService, PostView, ServiceError};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Deserialize)]
struct GetPostsParams {
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePostParams {
    post_id: i64,
}

#[derive(Deserialize)]
struct UpdateParams {
    id: i64,
}

/// Router over `service` exposing the four service endpoints.
pub fn app(service: PostService) -> Router {
    Router::new()
        .route("/callRestGet", get(call_rest_get))
        .route("/getPosts", get(get_posts))
        .route("/deletePost", delete(delete_post))
        .route("/update", put(update_post))
        .with_state(service)
}

pub async fn run(listener: TcpListener, service: PostService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}

/// GET /callRestGet — fetch from the source and reconcile into the store.
/// The same entry point the sync timer uses.
async fn call_rest_get(State(service): State<PostService>) -> StatusCode {
    info!("manual sync triggered");
    match service.refresh().await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!(error = %err, "sync failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /getPosts[?title=] — non-deleted posts, optionally filtered by
/// title substring, projected to `{id, title, body}`.
async fn get_posts(
    State(service): State<PostService>,
    Query(params): Query<GetPostsParams>,
) -> Result<Json<Vec<PostView>>, StatusCode> {
    let result = match params.title.as_deref() {
        Some(title) => service.list_active_by_title(title).await,
        None => service.list_active().await,
    };
    match result {
        Ok(posts) => Ok(Json(posts.iter().map(PostView::from).collect())),
        Err(err) => {
            error!(error = %err, "listing posts failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /deletePost?postId= — soft delete; unknown ids answer 200 too.
async fn delete_post(
    State(service): State<PostService>,
    Query(params): Query<DeletePostParams>,
) -> StatusCode {
    match service.delete_by_id(params.post_id).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            error!(error = %err, "delete failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// PUT /update?id= — overwrite title/body of the post with the query id.
/// The query parameter is authoritative; a differing body id is logged and
/// overridden, not rejected.
async fn update_post(
    State(service): State<PostService>,
    Query(params): Query<UpdateParams>,
    Json(mut payload): Json<Post>,
) -> Result<Json<PostView>, StatusCode> {
    if payload.id != params.id {
        warn!(
            query_id = params.id,
            body_id = payload.id,
            "update body id differs from query id"
        );
        payload.id = params.id;
    }
    match service.update(payload).await {
        Ok(post) => Ok(Json(PostView::from(&post))),
        Err(ServiceError::NotFound(id)) => {
            info!(id, "update of unknown post id");
            Err(StatusCode::NOT_FOUND)
        }
        Err(err) => {
            error!(error = %err, "update failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
