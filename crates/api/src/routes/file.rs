//! Route definitions for poster files.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::file;
use crate::state::AppState;

/// File routes mounted at `/file` (root level, matching poster URLs).
///
/// ```text
/// POST   /upload            -> upload_file
/// GET    /upload            -> serve_upload_named
/// GET    /{filename}        -> serve_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            get(file::serve_upload_named).post(file::upload_file),
        )
        .route("/{filename}", get(file::serve_file))
}
