//! Movie use cases.
//!
//! Coordinates the movie store and poster file storage, and maps stored
//! rows to [`MovieDto`]s with a derived poster URL. Held in
//! [`AppState`](crate::state::AppState) as an `Arc<MovieService>`.
//!
//! File and record writes are not atomic: a failure after a poster upload
//! leaves the file behind, and a failure after a poster delete leaves the
//! record pointing at a missing file.

use std::sync::Arc;

use movieflix_core::error::CoreError;
use movieflix_core::movie::MOVIE_ENTITY;
use movieflix_core::pagination::{PageRequest, SortDirection, SortField};
use movieflix_core::storage::{FileStore, UploadedFile};
use movieflix_core::types::DbId;
use movieflix_db::models::movie::{MovieDto, MovieFields, MoviePageResponse};
use movieflix_db::repositories::MovieRepository;

use crate::error::{AppError, AppResult};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: MOVIE_ENTITY,
        id,
    })
}

/// Movie catalog operations over a store and a poster file store.
pub struct MovieService {
    repo: Arc<dyn MovieRepository>,
    files: Arc<dyn FileStore>,
    base_url: String,
}

impl MovieService {
    /// Create a service; `base_url` is the public origin poster URLs hang off.
    pub fn new(
        repo: Arc<dyn MovieRepository>,
        files: Arc<dyn FileStore>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            files,
            base_url: base_url.into(),
        }
    }

    /// Create a movie from `dto` with `file` as its poster.
    ///
    /// Fails with `Conflict` when a file of the same name is already stored;
    /// nothing is written in that case.
    pub async fn add_movie(&self, dto: MovieDto, file: UploadedFile) -> AppResult<MovieDto> {
        dto.validate()?;

        // 1. Refuse to clobber an existing poster.
        self.ensure_name_free(file.file_name()).await?;

        // 2. Store the poster and remember its name.
        let poster = self.files.upload_file(&file).await?;

        // 3. Insert the record; the store assigns the identifier.
        let movie = self
            .repo
            .insert(&MovieFields::from_dto(&dto, poster))
            .await?;
        tracing::info!(movie_id = movie.movie_id, poster = %movie.poster, "Movie created");

        Ok(MovieDto::from_movie(movie, &self.base_url))
    }

    /// Fetch one movie.
    pub async fn get_movie(&self, id: DbId) -> AppResult<MovieDto> {
        let movie = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        Ok(MovieDto::from_movie(movie, &self.base_url))
    }

    /// Every movie, in store order.
    pub async fn get_all_movies(&self) -> AppResult<Vec<MovieDto>> {
        let movies = self.repo.find_all().await?;
        Ok(movies
            .into_iter()
            .map(|m| MovieDto::from_movie(m, &self.base_url))
            .collect())
    }

    /// Overwrite a movie's fields, optionally replacing its poster.
    ///
    /// Without `file` the stored poster is kept. With `file` the old poster
    /// is deleted (absence ignored) before the new one is written. A new
    /// file whose name is taken by some other stored file is a `Conflict`,
    /// and nothing is changed.
    pub async fn update_movie(
        &self,
        id: DbId,
        dto: MovieDto,
        file: Option<UploadedFile>,
    ) -> AppResult<MovieDto> {
        dto.validate()?;

        // 1. The movie must exist.
        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        // 2. Swap the poster file if a new one was sent.
        let poster = match file {
            Some(file) => {
                if file.file_name() != existing.poster {
                    self.ensure_name_free(file.file_name()).await?;
                }
                self.files.delete_file(&existing.poster).await?;
                self.files.upload_file(&file).await?
            }
            None => existing.poster,
        };

        // 3. Overwrite the record, keeping the identifier.
        let movie = self
            .repo
            .update(id, &MovieFields::from_dto(&dto, poster))
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(movie_id = id, poster = %movie.poster, "Movie updated");

        Ok(MovieDto::from_movie(movie, &self.base_url))
    }

    /// Delete a movie and its poster file, returning a confirmation message.
    pub async fn delete_movie(&self, id: DbId) -> AppResult<String> {
        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        self.files.delete_file(&existing.poster).await?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(movie_id = id, "Movie deleted");

        Ok(format!("Movie deleted with id = {id}"))
    }

    /// One page of movies in identifier order.
    pub async fn get_all_movies_with_pagination(
        &self,
        page: i64,
        size: i64,
    ) -> AppResult<MoviePageResponse> {
        let request = PageRequest::new(page, size)?;
        self.fetch_page(request).await
    }

    /// One page of movies sorted by `sort_by`.
    ///
    /// `dir` equal to `"asc"` (any casing) sorts ascending; anything else
    /// sorts descending by the same field.
    pub async fn get_all_movies_with_pagination_and_sorting(
        &self,
        page: i64,
        size: i64,
        sort_by: &str,
        dir: &str,
    ) -> AppResult<MoviePageResponse> {
        let request = PageRequest::new(page, size)?
            .sorted_by(SortField::parse(sort_by)?, SortDirection::from_param(dir));
        self.fetch_page(request).await
    }

    /// Whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repo.ping().await.is_ok()
    }

    async fn ensure_name_free(&self, file_name: &str) -> AppResult<()> {
        if self.files.exists(file_name).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "File '{file_name}' already exists! Please enter another file name"
            ))));
        }
        Ok(())
    }

    async fn fetch_page(&self, request: PageRequest) -> AppResult<MoviePageResponse> {
        let page = self.repo.find_page(&request).await?;
        Ok(MoviePageResponse::from_page(page, &request, &self.base_url))
    }
}
