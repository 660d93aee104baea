//! Handlers for poster files served under `/file`.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use movieflix_core::error::CoreError;
use movieflix_core::poster::content_type_for_filename;

use crate::error::{AppError, AppResult};
use crate::handlers::upload::{read_movie_form, require_file};
use crate::response::DataResponse;
use crate::state::AppState;

/// Path segment of the upload route under `/file`.
pub const UPLOAD_FILE_NAME: &str = "upload";

/// GET /file/{filename}
///
/// Returns the raw file bytes with a Content-Type guessed from the extension.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    retrieve(&state, &filename).await
}

/// GET /file/upload
///
/// `/upload` is also the upload route, so a stored file named `upload` is
/// served from here.
pub async fn serve_upload_named(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    retrieve(&state, UPLOAD_FILE_NAME).await
}

async fn retrieve(state: &AppState, filename: &str) -> AppResult<impl IntoResponse> {
    let bytes = state.files.retrieve_file(filename).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for_filename(filename))],
        bytes,
    ))
}

/// POST /file/upload
///
/// Stores a standalone file from the multipart `file` part and returns the
/// stored filename. Refuses to overwrite an existing file.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<String>>)> {
    let mut form = read_movie_form(multipart).await?;
    let file = require_file(&mut form)?;

    if state.files.exists(file.file_name()).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "File '{}' already exists! Please enter another file name",
            file.file_name()
        ))));
    }

    let stored = state.files.upload_file(&file).await?;
    tracing::info!(file_name = %stored, "File uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}
