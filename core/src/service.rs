//! Sync engine and query/mutation operations over the post store.
//!
//! # Design
//! `reconcile` is the one non-trivial rule in the system: a fetched post may
//! overwrite a stored row only while that row is still `Active`. Once a post
//! has been locally updated or deleted, refreshes from the source leave it
//! alone — local state wins. Everything else is a thin layer over the store:
//! reads filter out soft-deleted rows, delete flips the status flag, update
//! overwrites title and body and marks the row `Updated`.
//!
//! Reconcile writes row by row against a snapshot read at entry; there is no
//! batch transaction, so a mid-batch storage error leaves the earlier rows
//! applied. A concurrent update or delete racing a sync on the same id
//! resolves to whichever write lands last.

use tracing::{debug, info};

use crate::error::ServiceError;
use crate::fetcher::PostFetcher;
use crate::store::PostStore;
use crate::types::{Post, Status};

/// The post service: reconciles the source into the store and answers
/// queries and mutations over it.
#[derive(Clone)]
pub struct PostService {
    store: PostStore,
    fetcher: PostFetcher,
}

impl PostService {
    pub fn new(store: PostStore, fetcher: PostFetcher) -> Self {
        Self { store, fetcher }
    }

    /// Fetch from the source and reconcile into the store. Shared by the
    /// manual trigger endpoint and the sync timer; returns the number of
    /// rows written.
    pub async fn refresh(&self) -> Result<usize, ServiceError> {
        let fetched = self.fetcher.fetch().await;
        self.reconcile(fetched).await
    }

    /// Merge `fetched` into the store under the local-wins rule: a fetched
    /// post is saved iff its id is new or the stored row is still `Active`.
    /// Saved rows are written with status `Active` regardless of the input.
    pub async fn reconcile(&self, fetched: Vec<Post>) -> Result<usize, ServiceError> {
        let stored = self.store.find_all().await?;
        let mut saved = 0;
        for post in fetched {
            let eligible = match stored.iter().find(|q| q.id == post.id) {
                None => true,
                Some(q) => q.status == Status::Active,
            };
            if !eligible {
                debug!(id = post.id, "skipping locally modified post");
                continue;
            }
            let fresh = Post {
                status: Status::Active,
                ..post
            };
            self.store.upsert(&fresh).await?;
            debug!(id = fresh.id, "saved post from source");
            saved += 1;
        }
        info!(saved, "reconcile complete");
        Ok(saved)
    }

    /// All stored posts that are not soft-deleted, in store order.
    pub async fn list_active(&self) -> Result<Vec<Post>, ServiceError> {
        let posts = self.store.find_all().await?;
        let active: Vec<Post> = posts
            .into_iter()
            .filter(|p| p.status != Status::Deleted)
            .collect();
        debug!(count = active.len(), "listed active posts");
        Ok(active)
    }

    /// Non-deleted posts whose title contains `title`, ignoring ASCII case
    /// (the store's `lower()` does not fold non-ASCII letters).
    pub async fn list_active_by_title(&self, title: &str) -> Result<Vec<Post>, ServiceError> {
        let posts = self.store.find_by_title(title).await?;
        let active: Vec<Post> = posts
            .into_iter()
            .filter(|p| p.status != Status::Deleted)
            .collect();
        debug!(title, count = active.len(), "listed active posts by title");
        Ok(active)
    }

    /// Soft-delete the post with `id`. A missing id is not an error, and
    /// repeated deletes leave the status at `Deleted`.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        match self.store.find_by_id(id).await? {
            Some(mut post) => {
                post.status = Status::Deleted;
                self.store.upsert(&post).await?;
                info!(id, "soft-deleted post");
            }
            None => info!(id, "delete requested for unknown post id"),
        }
        Ok(())
    }

    /// Overwrite title and body of the stored post sharing `new_post.id`,
    /// mark it `Updated` and return it. `user_id` is never touched. Missing
    /// and soft-deleted ids yield `NotFound` — a deleted row stays deleted.
    pub async fn update(&self, new_post: Post) -> Result<Post, ServiceError> {
        match self.store.find_by_id(new_post.id).await? {
            Some(mut stored) if stored.status != Status::Deleted => {
                stored.title = new_post.title;
                stored.body = new_post.body;
                stored.status = Status::Updated;
                self.store.upsert(&stored).await?;
                info!(id = stored.id, "updated post");
                Ok(stored)
            }
            Some(_) => {
                info!(id = new_post.id, "update requested for deleted post");
                Err(ServiceError::NotFound(new_post.id))
            }
            None => {
                info!(id = new_post.id, "update requested for unknown post id");
                Err(ServiceError::NotFound(new_post.id))
            }
        }
    }
}
