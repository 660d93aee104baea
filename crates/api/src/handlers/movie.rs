//! Handlers for the `/movies` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movieflix_core::types::DbId;
use movieflix_db::models::movie::{MovieDto, MoviePageResponse};

use crate::error::AppResult;
use crate::handlers::upload::{read_movie_form, require_file, require_movie_dto};
use crate::query::{PageParams, SortedPageParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/movies
///
/// Multipart form with a required `file` (poster) and `movieDto` (JSON).
/// Returns 409 if a poster with the same filename is already stored.
pub async fn add_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MovieDto>)> {
    let mut form = read_movie_form(multipart).await?;
    let dto = require_movie_dto(&mut form)?;
    let file = require_file(&mut form)?;

    let movie = state.movies.add_movie(dto, file).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MovieDto>> {
    let movie = state.movies.get_movie(id).await?;
    Ok(Json(movie))
}

/// GET /api/v1/movies
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieDto>>> {
    let movies = state.movies.get_all_movies().await?;
    Ok(Json(movies))
}

/// PUT /api/v1/movies/{id}
///
/// Multipart form with a required `movieDto` and an optional replacement
/// `file`. The poster is kept when no file is sent.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MovieDto>> {
    let mut form = read_movie_form(multipart).await?;
    let dto = require_movie_dto(&mut form)?;

    let movie = state.movies.update_movie(id, dto, form.file).await?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<String>>> {
    let message = state.movies.delete_movie(id).await?;
    Ok(Json(DataResponse { data: message }))
}

/// GET /api/v1/movies/page?pageNumber=&pageSize=
pub async fn list_movies_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<MoviePageResponse>> {
    let page = state
        .movies
        .get_all_movies_with_pagination(params.page_number, params.page_size)
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/movies/page-sorted?pageNumber=&pageSize=&sortBy=&dir=
pub async fn list_movies_page_sorted(
    State(state): State<AppState>,
    Query(params): Query<SortedPageParams>,
) -> AppResult<Json<MoviePageResponse>> {
    let page = state
        .movies
        .get_all_movies_with_pagination_and_sorting(
            params.page_number,
            params.page_size,
            &params.sort_by,
            &params.dir,
        )
        .await?;
    Ok(Json(page))
}
