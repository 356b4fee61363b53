//! memo-api - HTTP server for the memo note-taking service.
//!
//! The binary in `main.rs` reads [`AppConfig`], opens the database, loads
//! [`Pages`], and serves [`router`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;

use std::path::Path;
use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    services::ServeFile,
    trace::TraceLayer,
};
use uuid::Uuid;

use memo_db::Database;

pub use config::{AppConfig, LogConfig, LogFormat};
pub use error::ApiError;
pub use pages::Pages;

use handlers::{
    notes::{add_new_memo, delete_note, get_note, list_notes},
    pages::{add_new_memo_page, display_page},
    tags::list_tags,
};

/// Largest accepted request body. Notes are plain text.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(db: Database, pages: Pages) -> Self {
        Self {
            db,
            pages: Arc::new(pages),
        }
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build the full route table.
///
/// `css_dir` must contain `styles.css`, served at `/files/styles.css`.
pub fn router(state: AppState, css_dir: &Path) -> Router {
    Router::new()
        // Pages
        .route("/", get(display_page))
        .route("/addNewMemo", get(add_new_memo_page))
        // Files
        .route_service("/files/styles.css", ServeFile::new(css_dir.join("styles.css")))
        // Form API
        .route("/api/addNewMemo", post(add_new_memo))
        // JSON API
        .route("/api/notes", get(list_notes))
        .route("/api/notes/:id", get(get_note).delete(delete_note))
        .route("/api/tags", get(list_tags))
        .route("/health", get(health_check))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
