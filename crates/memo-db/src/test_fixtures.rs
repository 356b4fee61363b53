//! Test fixtures for database integration tests.
//!
//! Each [`TestDatabase`] lives in its own temporary directory, so tests never
//! share state and the file disappears when the fixture is dropped.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memo_db::test_fixtures::TestDatabase;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::new().await;
//!     test_db.db.notes.insert(request).await.unwrap();
//! }
//! ```

use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::{
    pool::create_pool_with_config,
    schema::{initialize_schema, LINK_TABLE, NOTES_TABLE, TAGS_TABLE},
    Database, PoolConfig,
};

/// A schema-initialized database in a temporary directory.
pub struct TestDatabase {
    pub pool: SqlitePool,
    pub db: Database,
    /// Connection URL of the database file.
    pub url: String,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh database with all tables in place.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("memo-test.db").display());
        let pool = create_pool_with_config(&url, PoolConfig::new().max_connections(2))
            .await
            .expect("Failed to create test pool");
        initialize_schema(&pool)
            .await
            .expect("Failed to initialize test schema");

        Self {
            db: Database::new(pool.clone()),
            pool,
            url,
            _dir: dir,
        }
    }

    /// Count rows in one of the schema tables.
    ///
    /// Panics on any other table name.
    pub async fn count(&self, table: &str) -> i64 {
        assert!(
            [NOTES_TABLE, TAGS_TABLE, LINK_TABLE].contains(&table),
            "unknown table: {}",
            table
        );
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }
}
