pub mod file;
pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                                          list, add (multipart)
/// /movies/page                                     paged list
/// /movies/page-sorted                              paged + sorted list
/// /movies/{id}                                     get, update (multipart), delete
/// ```
///
/// Poster files (`/file/...`) and `/health` live at the root, outside this
/// tree, because poster URLs are built as `{base_url}/file/{name}`.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/movies", movie::router())
}
