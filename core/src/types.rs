//! Domain types for the post service.
//!
//! # Design
//! `Post` carries the upstream wire schema plus the local `status` column.
//! Upstream payloads have no status field, so deserialization defaults it to
//! `Active`; the camelCase rename covers the upstream's `userId` key.
//! `PostView` is the only shape the HTTP surface ever serializes; `status`
//! and `user_id` stay internal.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a stored post.
///
/// `Updated` and `Deleted` mark local modifications; a post in either state
/// is never touched by a sync from the source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Active,
    Updated,
    Deleted,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Updated => "UPDATED",
            Status::Deleted => "DELETED",
        }
    }
}

/// A post record. Two posts are equal iff all five fields are equal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: Status,
}

/// The outbound JSON projection of a post: exactly `{id, title, body}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}
