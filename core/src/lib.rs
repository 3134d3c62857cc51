//! Domain core for the post sync service.
//!
//! # Overview
//! Pulls posts from an external JSON endpoint, stores them in SQLite and
//! answers queries and mutations over the stored set. Rows are never
//! removed: delete and update flip a status flag, and the reconcile step
//! refuses to overwrite any row that is no longer `Active`, so local
//! modifications survive every refresh from the source.
//!
//! # Design
//! - `PostStore` owns the single `posts` table behind a clone-shared
//!   connection handle.
//! - `PostFetcher` turns every fetch failure into an empty list; a bad sync
//!   cycle is a no-op, never an error.
//! - `PostService` composes the two and carries the local-wins reconcile
//!   rule plus the soft-delete/soft-update mutations.
//! - `Post` mirrors the upstream wire schema; `PostView` is the only shape
//!   the HTTP layer exposes.

pub mod error;
pub mod fetcher;
pub mod service;
pub mod store;
pub mod types;

pub use error::ServiceError;
pub use fetcher::PostFetcher;
pub use service::PostService;
pub use store::PostStore;
pub use types::{Post, PostView, Status};
