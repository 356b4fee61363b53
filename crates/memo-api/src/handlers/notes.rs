//! Note HTTP handlers.
//!
//! The form endpoint answers with a status code only. The JSON endpoints
//! expose the same data for the display page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use memo_core::{CreateNoteRequest, NoteFull, NoteRepository};

use crate::{ApiError, AppState};

/// Form fields posted by the creation page.
#[derive(Debug, Deserialize)]
pub struct NewMemoForm {
    pub title: Option<String>,
    /// Note body.
    #[serde(default, rename = "muistiinpano", alias = "note")]
    pub text: String,
    /// Space-separated tag names.
    #[serde(default)]
    pub tags: String,
}

impl From<NewMemoForm> for CreateNoteRequest {
    fn from(form: NewMemoForm) -> Self {
        CreateNoteRequest::from_form(form.title, form.text, &form.tags)
    }
}

/// Create a note from the submitted form.
///
/// # Returns
/// - 200 OK on success
/// - 400 Bad Request if the note text is blank
/// - 500 Internal Server Error, with no body, on any store failure
pub async fn add_new_memo(
    State(state): State<AppState>,
    Form(form): Form<NewMemoForm>,
) -> Result<StatusCode, ApiError> {
    let req = CreateNoteRequest::from(form);
    let tag_count = req.tags.len();
    let note_id = state.db.notes.insert(req).await?;

    info!(
        subsystem = "api",
        op = "add_new_memo",
        note_id,
        tag_count,
        "Note added"
    );
    Ok(StatusCode::OK)
}

/// List all notes with their tags.
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteFull>>, ApiError> {
    let notes = state.db.notes.list().await?;
    Ok(Json(notes))
}

/// Get a single note.
///
/// # Returns
/// - 200 OK with the note
/// - 404 Not Found if no note has this id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NoteFull>, ApiError> {
    let note = state.db.notes.fetch(id).await?;
    Ok(Json(note))
}

/// Delete a note. Links go with it; tags stay.
///
/// # Returns
/// - 204 No Content on success
/// - 404 Not Found if no note has this id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
