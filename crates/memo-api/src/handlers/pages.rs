//! Front-end page handlers.

use axum::{extract::State, response::Html};

use crate::AppState;

/// `GET /`: note listing page.
pub async fn display_page(State(state): State<AppState>) -> Html<String> {
    Html(state.pages.display.clone())
}

/// `GET /addNewMemo`: note creation form.
pub async fn add_new_memo_page(State(state): State<AppState>) -> Html<String> {
    Html(state.pages.add_new_memo.clone())
}
