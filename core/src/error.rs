//! Error type for the post service.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the post does not exist" from a storage failure: the request layer maps
//! it to 404 and everything else to 500. Fetch failures have no variant at
//! all, since the fetcher's contract turns them into an empty list.

use thiserror::Error;

/// Errors returned by `PostStore` and `PostService` operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No stored post carries the requested id (or it is soft-deleted).
    #[error("post {0} not found")]
    NotFound(i64),

    /// The underlying SQLite store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}
