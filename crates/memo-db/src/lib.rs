//! # memo-db
//!
//! SQLite database layer for memo.
//!
//! This crate provides:
//! - Connection pool management
//! - Idempotent schema initialization
//! - Note and tag repository implementations
//!
//! ## Example
//!
//! ```rust,ignore
//! use memo_db::{CreateNoteRequest, Database, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://data.db").await?;
//!
//!     let note_id = db.notes.insert(CreateNoteRequest {
//!         title: Some("Hello".to_string()),
//!         text: "Hello, world!".to_string(),
//!         tags: vec!["greeting".to_string()],
//!     }).await?;
//!
//!     println!("Created note: {}", note_id);
//!     Ok(())
//! }
//! ```
pub mod notes;
pub mod pool;
pub mod schema;
pub mod tags;

// Note: Always compiled so integration tests (in tests/) can use it
pub mod test_fixtures;

// Re-export core types
pub use memo_core::*;

pub use notes::SqliteNoteRepository;
pub use pool::{
    create_pool, create_pool_with_config, log_pool_metrics, PoolConfig, DEFAULT_DATABASE_URL,
};
pub use schema::initialize_schema;
pub use tags::SqliteTagRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::SqlitePool,
    /// Note repository.
    pub notes: SqliteNoteRepository,
    /// Tag repository.
    pub tags: SqliteTagRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            notes: SqliteNoteRepository::new(pool.clone()),
            tags: SqliteTagRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the given URL and make sure the schema exists.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, PoolConfig::default()).await
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        initialize_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
