//! Tag HTTP handlers.

use axum::{extract::State, Json};

use memo_core::{Tag, TagRepository};

use crate::{ApiError, AppState};

/// List all tags with how many notes use each.
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = state.db.tags.list().await?;
    Ok(Json(tags))
}
