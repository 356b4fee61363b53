//! Core traits for memo abstractions.
//!
//! These traits define the interfaces the storage layer implements,
//! keeping the HTTP layer independent of the concrete backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note, its tags, and the links between them.
    ///
    /// Statements run one after another without a surrounding transaction,
    /// so a failure after the note row is written leaves the note in place.
    async fn insert(&self, req: CreateNoteRequest) -> Result<i64>;

    /// Fetch a full note by ID.
    async fn fetch(&self, id: i64) -> Result<NoteFull>;

    /// List every note in insertion order, loading tags with one query per note.
    async fn list(&self) -> Result<Vec<NoteFull>>;

    /// Same result as [`NoteRepository::list`], loading all tags in one query.
    async fn list_batched(&self) -> Result<Vec<NoteFull>>;

    /// Delete a note. Its links cascade; tags are kept.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// TAG REPOSITORY TRAITS
// =============================================================================

/// Repository for tag operations.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Create a tag if it doesn't exist.
    async fn create(&self, name: &str) -> Result<()>;

    /// List all tags.
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Link an existing tag to a note.
    async fn add_to_note(&self, note_id: i64, tag_name: &str) -> Result<()>;

    /// Get all tag names for a note.
    async fn get_for_note(&self, note_id: i64) -> Result<Vec<String>>;
}
