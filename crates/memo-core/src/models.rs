//! Domain models for memo.

use serde::{Deserialize, Serialize};

/// A note with all of its tag names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFull {
    pub id: i64,
    /// Optional title; the form may submit none.
    pub title: Option<String>,
    /// Note body, unique across all notes.
    pub text: String,
    /// Tag names ordered by name.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A tag definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Number of notes with this tag (computed)
    #[serde(default)]
    pub note_count: i64,
}

/// Request for creating a new note together with its tags.
#[derive(Debug, Clone, Default)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub text: String,
    pub tags: Vec<String>,
}

impl CreateNoteRequest {
    /// Build a request from raw form values, splitting the tag string.
    pub fn from_form(title: Option<String>, text: String, raw_tags: &str) -> Self {
        Self {
            title,
            text,
            tags: crate::tags::parse_tag_string(raw_tags),
        }
    }

    /// Reject requests that would store an empty note.
    pub fn validate(&self) -> crate::Result<()> {
        if self.text.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "Note text is required".to_string(),
            ));
        }
        Ok(())
    }
}
