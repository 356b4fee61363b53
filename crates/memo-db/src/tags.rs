//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::trace;

use memo_core::{Error, Result, Tag, TagRepository};

/// SQLite implementation of TagRepository.
pub struct SqliteTagRepository {
    pool: SqlitePool,
}

impl SqliteTagRepository {
    /// Create a new SqliteTagRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert a tag, treating an existing name as success.
pub(crate) async fn insert_tag_if_missing(pool: &SqlitePool, name: &str) -> Result<()> {
    let result = sqlx::query("INSERT INTO tags (tag_name) VALUES (?) ON CONFLICT(tag_name) DO NOTHING")
        .bind(name)
        .execute(pool)
        .await
        .map_err(Error::Database)?;

    trace!(
        subsystem = "database",
        component = "tags",
        op = "create",
        tag_name = name,
        created = result.rows_affected() > 0,
        "Tag ensured"
    );
    Ok(())
}

/// Link a note to the tag with the given name.
///
/// Fails if the tag row does not exist or the link is already present.
pub(crate) async fn link_tag(pool: &SqlitePool, note_id: i64, tag_name: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO note_tag_link (note_id, tag_id) VALUES (?, (SELECT id FROM tags WHERE tag_name = ?))",
    )
    .bind(note_id)
    .bind(tag_name)
    .execute(pool)
    .await
    .map_err(Error::Database)?;

    trace!(
        subsystem = "database",
        component = "tags",
        op = "link",
        note_id,
        tag_name,
        "Tag linked to note"
    );
    Ok(())
}

/// Tag names linked to one note, ordered by name.
pub(crate) async fn tags_for_note(pool: &SqlitePool, note_id: i64) -> Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        SELECT t.tag_name
        FROM tags AS t
        INNER JOIN note_tag_link AS ntl ON t.id = ntl.tag_id
        WHERE ntl.note_id = ?
        ORDER BY t.tag_name
        "#,
    )
    .bind(note_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)?;

    Ok(rows.into_iter().map(|row| row.get("tag_name")).collect())
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn create(&self, name: &str) -> Result<()> {
        insert_tag_if_missing(&self.pool, name).await
    }

    async fn list(&self) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"
            SELECT
                t.id,
                t.tag_name,
                COUNT(ntl.note_id) AS note_count
            FROM tags t
            LEFT JOIN note_tag_link ntl ON ntl.tag_id = t.id
            GROUP BY t.id, t.tag_name
            ORDER BY t.tag_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let tags = rows
            .into_iter()
            .map(|row| Tag {
                id: row.get("id"),
                name: row.get("tag_name"),
                note_count: row.get("note_count"),
            })
            .collect();

        Ok(tags)
    }

    async fn add_to_note(&self, note_id: i64, tag_name: &str) -> Result<()> {
        link_tag(&self.pool, note_id, tag_name).await
    }

    async fn get_for_note(&self, note_id: i64) -> Result<Vec<String>> {
        tags_for_note(&self.pool, note_id).await
    }
}
