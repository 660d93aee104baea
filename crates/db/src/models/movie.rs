//! Movie entity, write model, and transfer objects.

use std::collections::BTreeSet;

use movieflix_core::error::CoreError;
use movieflix_core::movie::{normalize_cast, validate_movie_fields};
use movieflix_core::pagination::{PageMeta, PageRequest};
use movieflix_core::poster;
use movieflix_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `movies` table joined with its `movie_cast` members.
///
/// `movie_cast` is sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub movie_id: DbId,
    pub title: String,
    pub director: String,
    pub studio: String,
    pub movie_cast: Vec<String>,
    pub release_year: i32,
    pub poster: String,
}

/// Writable columns of a movie, used for both insert and full overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    pub title: String,
    pub director: String,
    pub studio: String,
    pub movie_cast: Vec<String>,
    pub release_year: i32,
    pub poster: String,
}

impl MovieFields {
    /// Take the descriptive fields from `dto` and pair them with the stored
    /// poster filename.
    pub fn from_dto(dto: &MovieDto, poster: String) -> Self {
        Self {
            title: dto.title.clone(),
            director: dto.director.clone(),
            studio: dto.studio.clone(),
            movie_cast: normalize_cast(&dto.movie_cast).into_iter().collect(),
            release_year: dto.release_year,
            poster,
        }
    }
}

/// One page of rows plus the size of the full result set.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total_elements: i64,
}

// ---------------------------------------------------------------------------
// DTOs (API payloads)
// ---------------------------------------------------------------------------

/// Movie as exposed over the API.
///
/// On input `movieId`, `poster` and `posterUrl` are optional and ignored:
/// the server assigns the identifier and derives the poster fields from the
/// uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    #[serde(default)]
    pub movie_id: Option<DbId>,
    pub title: String,
    pub director: String,
    pub studio: String,
    #[serde(default)]
    pub movie_cast: BTreeSet<String>,
    pub release_year: i32,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub poster_url: String,
}

impl MovieDto {
    /// Map a stored movie to its API shape, deriving `posterUrl` from
    /// `base_url`.
    pub fn from_movie(movie: Movie, base_url: &str) -> Self {
        let poster_url = poster::poster_url(base_url, &movie.poster);
        Self {
            movie_id: Some(movie.movie_id),
            title: movie.title,
            director: movie.director,
            studio: movie.studio,
            movie_cast: movie.movie_cast.into_iter().collect(),
            release_year: movie.release_year,
            poster: movie.poster,
            poster_url,
        }
    }

    /// Check the client-supplied fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_movie_fields(&self.title, &self.director, &self.studio)
    }
}

/// A page of movies with paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePageResponse {
    pub movie_dtos: Vec<MovieDto>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub is_last: bool,
}

impl MoviePageResponse {
    /// Assemble the response for `request` from an already-fetched page.
    pub fn from_page(page: MoviePage, request: &PageRequest, base_url: &str) -> Self {
        let meta = PageMeta::compute(request, page.total_elements);
        Self {
            movie_dtos: page
                .movies
                .into_iter()
                .map(|m| MovieDto::from_movie(m, base_url))
                .collect(),
            page_number: request.page,
            page_size: request.size,
            total_elements: page.total_elements,
            total_pages: meta.total_pages,
            is_last: meta.is_last,
        }
    }
}
