//! Error types for memo.

use thiserror::Error;

/// Result type alias using memo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for memo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Could not open or reach the store (fatal at startup)
    #[error("Store connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Table creation failed (fatal at startup)
    #[error("Schema initialization error: {0}")]
    SchemaInit(#[source] sqlx::Error),

    /// A note with the same body text already exists
    #[error("A note with this text already exists")]
    DuplicateNoteBody,

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns true if the error is a unique-constraint violation reported by the
/// driver.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
