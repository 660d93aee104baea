//! Route definitions for the movie catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Movie routes mounted at `/movies`.
///
/// ```text
/// GET    /                  -> list_movies
/// POST   /                  -> add_movie
/// GET    /page              -> list_movies_page
/// GET    /page-sorted       -> list_movies_page_sorted
/// GET    /{id}              -> get_movie
/// PUT    /{id}              -> update_movie
/// DELETE /{id}              -> delete_movie
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movie::list_movies).post(movie::add_movie))
        .route("/page", get(movie::list_movies_page))
        .route("/page-sorted", get(movie::list_movies_page_sorted))
        .route(
            "/{id}",
            get(movie::get_movie)
                .put(movie::update_movie)
                .delete(movie::delete_movie),
        )
}
