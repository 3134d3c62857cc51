//! Outbound fetch of posts from the external source.
//!
//! # Design
//! One GET to `{base}/posts`, decoded as a JSON array of `{userId, id,
//! title, body}` objects; missing status fields default to `Active` during
//! deserialization. The contract is deliberately infallible: an unreachable
//! host, a non-2xx status or an undecodable body all log a warning and come
//! back as an empty list, so a bad sync cycle is a no-op rather than an
//! error the caller has to handle. No retries, no pagination, no caching.

use tracing::{info, warn};

use crate::types::Post;

/// Client for the external posts endpoint.
#[derive(Debug, Clone)]
pub struct PostFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl PostFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the current post list from the source; empty on any failure.
    pub async fn fetch(&self) -> Vec<Post> {
        match self.try_fetch().await {
            Ok(posts) => {
                info!(count = posts.len(), "fetched posts from source");
                posts
            }
            Err(err) => {
                warn!(error = %err, url = %self.base_url, "post fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<Post>, reqwest::Error> {
        let url = format!("{}/posts", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        response.json().await
    }
}
