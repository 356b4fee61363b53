//! Schema initialization.
//!
//! The schema is additive only: tables are created when missing and never
//! altered, so this runs on every startup.

use sqlx::SqlitePool;
use tracing::{debug, info};

use memo_core::{Error, Result};

/// Table holding note bodies and optional titles.
pub const NOTES_TABLE: &str = "notes";
/// Table holding unique tag names.
pub const TAGS_TABLE: &str = "tags";
/// Association table between notes and tags.
pub const LINK_TABLE: &str = "note_tag_link";

const CREATE_STATEMENTS: [(&str, &str); 3] = [
    (
        NOTES_TABLE,
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            note TEXT NOT NULL UNIQUE
        )
        "#,
    ),
    (
        TAGS_TABLE,
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tag_name TEXT NOT NULL UNIQUE
        )
        "#,
    ),
    (
        LINK_TABLE,
        r#"
        CREATE TABLE IF NOT EXISTS note_tag_link (
            note_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (note_id, tag_id),
            FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
        )
        "#,
    ),
];

/// Create the note, tag, and link tables if they do not exist yet.
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    for (table, statement) in CREATE_STATEMENTS {
        debug!(
            subsystem = "database",
            component = "schema",
            op = "create_table",
            db_table = table,
            "Ensuring table exists"
        );
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::SchemaInit)?;
    }

    info!(
        subsystem = "database",
        component = "schema",
        op = "initialized",
        "Database schema ready"
    );
    Ok(())
}
