//! SQLite-backed record store for posts.
//!
//! # Design
//! One table, keyed by the upstream-assigned id. `PostStore` is a cheap
//! clone handle around a single connection; rusqlite connections are `Send`
//! but not `Sync`, so the handle serializes access through a tokio `Mutex`
//! and every operation locks, runs its statement, and releases. Writes go
//! through one upsert shape (`INSERT ... ON CONFLICT(id) DO UPDATE`), which
//! is also how soft deletes and updates persist — rows are never removed.
//! The schema is created on open; there is no migration machinery.

use std::path::Path;
use std::sync::Arc;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use crate::error::ServiceError;
use crate::types::{Post, Status};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS posts (
    id      INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    title   TEXT NOT NULL,
    body    TEXT NOT NULL,
    status  TEXT NOT NULL
)";

const POST_COLUMNS: &str = "id, user_id, title, body, status";

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "ACTIVE" => Ok(Status::Active),
            "UPDATED" => Ok(Status::Updated),
            "DELETED" => Ok(Status::Deleted),
            other => Err(FromSqlError::Other(
                format!("unknown post status {other:?}").into(),
            )),
        }
    }
}

/// Handle to the posts table. Clones share the same connection.
#[derive(Clone)]
pub struct PostStore {
    conn: Arc<Mutex<Connection>>,
}

impl PostStore {
    /// Open (and create if absent) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        Self::init(Connection::open(path)?)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self, ServiceError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, ServiceError> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Every stored post, deleted ones included, in id order.
    pub async fn find_all(&self) -> Result<Vec<Post>, ServiceError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id"))?;
        let rows = stmt.query_map([], row_to_post)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Post>>>()?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Post>, ServiceError> {
        let conn = self.conn.lock().await;
        let post = conn
            .query_row(
                &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
                params![id],
                row_to_post,
            )
            .optional()?;
        Ok(post)
    }

    /// Posts whose title contains `needle`, ignoring ASCII case. `instr`
    /// rather than `LIKE`, so `%` and `_` in the needle are literal.
    pub async fn find_by_title(&self, needle: &str) -> Result<Vec<Post>, ServiceError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE instr(lower(title), lower(?1)) > 0
             ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![needle], row_to_post)?;
        Ok(rows.collect::<rusqlite::Result<Vec<Post>>>()?)
    }

    /// Insert `post`, or overwrite the row sharing its id.
    pub async fn upsert(&self, post: &Post) -> Result<(), ServiceError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO posts (id, user_id, title, body, status)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                title = excluded.title,
                body = excluded.body,
                status = excluded.status",
            params![post.id, post.user_id, post.title, post.body, post.status],
        )?;
        Ok(())
    }
}

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        status: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str, status: Status) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: format!("body{id}"),
            status,
        }
    }

    #[tokio::test]
    async fn upsert_then_find_by_id_round_trips() {
        let store = PostStore::open_in_memory().unwrap();
        let original = post(1, "title1", Status::Active);
        store.upsert(&original).await.unwrap();

        let found = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found, original);
        assert!(store.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_overwrites_row_with_same_id() {
        let store = PostStore::open_in_memory().unwrap();
        store.upsert(&post(1, "title1", Status::Active)).await.unwrap();

        let replacement = Post {
            user_id: 2,
            body: "other".to_string(),
            ..post(1, "newtitle", Status::Updated)
        };
        store.upsert(&replacement).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], replacement);
    }

    #[tokio::test]
    async fn find_all_returns_rows_in_id_order() {
        let store = PostStore::open_in_memory().unwrap();
        for id in [3, 1, 2] {
            store.upsert(&post(id, "t", Status::Active)).await.unwrap();
        }
        let ids: Vec<i64> = store.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn find_by_title_ignores_case_and_matches_substring() {
        let store = PostStore::open_in_memory().unwrap();
        store.upsert(&post(1, "Hello World", Status::Active)).await.unwrap();
        store.upsert(&post(2, "Topic", Status::Active)).await.unwrap();

        let hits = store.find_by_title("WORLD").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert!(store.find_by_title("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_title_treats_percent_as_literal() {
        let store = PostStore::open_in_memory().unwrap();
        store.upsert(&post(1, "100% done", Status::Active)).await.unwrap();
        store.upsert(&post(2, "100 done", Status::Active)).await.unwrap();

        let hits = store.find_by_title("100%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[tokio::test]
    async fn find_by_title_folds_ascii_case_only() {
        let store = PostStore::open_in_memory().unwrap();
        store.upsert(&post(1, "Grüße", Status::Active)).await.unwrap();

        // Only the ASCII `G` needs folding here.
        assert_eq!(store.find_by_title("grüße").await.unwrap().len(), 1);

        // `Ü` is outside SQLite's ASCII-only lower(), so no match.
        assert!(store.find_by_title("GRÜßE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_round_trips_through_storage() {
        let store = PostStore::open_in_memory().unwrap();
        for (id, status) in [(1, Status::Active), (2, Status::Updated), (3, Status::Deleted)] {
            store.upsert(&post(id, "t", status)).await.unwrap();
        }
        let all = store.find_all().await.unwrap();
        let statuses: Vec<Status> = all.iter().map(|p| p.status).collect();
        assert_eq!(statuses, vec![Status::Active, Status::Updated, Status::Deleted]);
    }
}
