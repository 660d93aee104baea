//! Multipart form decoding shared by the movie and file handlers.
//!
//! Movie forms carry a `file` part (the poster) and a `movieDto` part
//! holding the movie as JSON text. Unknown parts are ignored.

use axum::extract::Multipart;
use movieflix_core::storage::UploadedFile;
use movieflix_db::models::movie::MovieDto;

use crate::error::{AppError, AppResult};

/// Multipart part carrying the poster bytes.
pub const FILE_FIELD: &str = "file";

/// Multipart part carrying the movie JSON.
pub const MOVIE_DTO_FIELD: &str = "movieDto";

/// Decoded parts of a movie form. Either part may be missing.
#[derive(Debug, Default)]
pub struct MovieForm {
    pub movie_dto: Option<MovieDto>,
    pub file: Option<UploadedFile>,
}

/// Read every part of a movie form.
///
/// A `file` part with no filename and no bytes counts as absent, which is
/// what browsers send when no file was chosen.
pub async fn read_movie_form(mut multipart: Multipart) -> AppResult<MovieForm> {
    let mut form = MovieForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FILE_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                let unnamed = file_name.as_deref().map_or(true, |n| n.trim().is_empty());
                if unnamed && data.is_empty() {
                    continue;
                }
                form.file = Some(UploadedFile::new(
                    file_name.as_deref(),
                    content_type.as_deref(),
                    data.to_vec(),
                )?);
            }
            MOVIE_DTO_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let dto: MovieDto = serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("Invalid '{MOVIE_DTO_FIELD}' JSON: {e}"))
                })?;
                form.movie_dto = Some(dto);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

/// Take the required movie JSON part out of a form.
pub fn require_movie_dto(form: &mut MovieForm) -> AppResult<MovieDto> {
    form.movie_dto
        .take()
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{MOVIE_DTO_FIELD}' field")))
}

/// Take the required file part out of a form.
pub fn require_file(form: &mut MovieForm) -> AppResult<UploadedFile> {
    form.file
        .take()
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{FILE_FIELD}' field")))
}
