//! Note repository implementation.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use memo_core::{
    is_unique_violation, CreateNoteRequest, Error, NoteFull, NoteRepository, Result,
};

use crate::tags::{insert_tag_if_missing, link_tag, tags_for_note};

/// SQLite implementation of NoteRepository.
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_note_row(&self, title: Option<&str>, text: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO notes (title, note) VALUES (?, ?)")
            .bind(title)
            .bind(text)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::DuplicateNoteBody
                } else {
                    Error::Database(e)
                }
            })?;
        Ok(result.last_insert_rowid())
    }

    async fn fetch_note_rows(&self) -> Result<Vec<NoteFull>> {
        let rows = sqlx::query("SELECT id, title, note FROM notes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(rows.into_iter().map(map_row_to_note).collect())
    }
}

/// Map a `notes` row to a NoteFull with no tags loaded.
fn map_row_to_note(row: SqliteRow) -> NoteFull {
    NoteFull {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("note"),
        tags: Vec::new(),
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<i64> {
        req.validate()?;
        let start = Instant::now();

        let note_id = self.insert_note_row(req.title.as_deref(), &req.text).await?;

        for tag in &req.tags {
            insert_tag_if_missing(&self.pool, tag).await?;
        }
        for tag in &req.tags {
            link_tag(&self.pool, note_id, tag).await?;
        }

        info!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id,
            tag_count = req.tags.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note created"
        );
        Ok(note_id)
    }

    async fn fetch(&self, id: i64) -> Result<NoteFull> {
        let row = sqlx::query("SELECT id, title, note FROM notes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NotFound(format!("Note {} not found", id)))?;

        let mut note = map_row_to_note(row);
        note.tags = tags_for_note(&self.pool, id).await?;
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<NoteFull>> {
        let start = Instant::now();
        let mut notes = self.fetch_note_rows().await?;

        // One tag query per note.
        for note in &mut notes {
            note.tags = tags_for_note(&self.pool, note.id).await?;
        }

        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn list_batched(&self) -> Result<Vec<NoteFull>> {
        let start = Instant::now();
        let mut notes = self.fetch_note_rows().await?;

        let rows = sqlx::query(
            r#"
            SELECT ntl.note_id, t.tag_name
            FROM note_tag_link AS ntl
            INNER JOIN tags AS t ON t.id = ntl.tag_id
            ORDER BY ntl.note_id, t.tag_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut tags_by_note: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            tags_by_note
                .entry(row.get("note_id"))
                .or_default()
                .push(row.get("tag_name"));
        }
        for note in &mut notes {
            note.tags = tags_by_note.remove(&note.id).unwrap_or_default();
        }

        debug!(
            subsystem = "database",
            component = "notes",
            op = "list_batched",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Note {} not found", id)));
        }

        info!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            note_id = id,
            "Note deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::TestDatabase;
    use memo_core::TagRepository;

    fn request(title: Option<&str>, text: &str, tags: &[&str]) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.map(str::to_string),
            text: text.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_increasing_ids() {
        let test_db = TestDatabase::new().await;
        let repo = &test_db.db.notes;

        let first = repo.insert(request(None, "first", &[])).await.unwrap();
        let second = repo.insert(request(None, "second", &[])).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_text_before_writing() {
        let test_db = TestDatabase::new().await;
        let repo = &test_db.db.notes;

        let result = repo.insert(request(Some("t"), "  ", &["a"])).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(repo.list().await.unwrap().is_empty());
        assert!(test_db.db.tags.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_note_is_not_found() {
        let test_db = TestDatabase::new().await;
        let result = test_db.db.notes.fetch(42).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_returns_title_and_tags() {
        let test_db = TestDatabase::new().await;
        let repo = &test_db.db.notes;

        let id = repo
            .insert(request(Some("Groceries"), "milk, eggs", &["shop", "home"]))
            .await
            .unwrap();
        let note = repo.fetch(id).await.unwrap();
        assert_eq!(note.title.as_deref(), Some("Groceries"));
        assert_eq!(note.text, "milk, eggs");
        assert_eq!(note.tags, vec!["home", "shop"]);
    }

    #[tokio::test]
    async fn test_missing_title_reads_back_as_none() {
        let test_db = TestDatabase::new().await;
        let repo = &test_db.db.notes;

        let id = repo.insert(request(None, "untitled", &[])).await.unwrap();
        assert_eq!(repo.fetch(id).await.unwrap().title, None);
    }

    #[tokio::test]
    async fn test_delete_then_fetch_is_not_found() {
        let test_db = TestDatabase::new().await;
        let repo = &test_db.db.notes;

        let id = repo.insert(request(None, "short-lived", &[])).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(matches!(repo.fetch(id).await, Err(Error::NotFound(_))));
        assert!(matches!(repo.delete(id).await, Err(Error::NotFound(_))));
    }
}
