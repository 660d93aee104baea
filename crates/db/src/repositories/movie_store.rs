//! Store trait for movie records.

use async_trait::async_trait;
use movieflix_core::pagination::PageRequest;
use movieflix_core::types::DbId;

use crate::models::movie::{Movie, MovieFields, MoviePage};
use crate::repositories::MovieRepo;
use crate::DbPool;

/// Durable storage for movies with store-assigned, never-reused identifiers.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Insert a new movie; the store assigns `movie_id`.
    async fn insert(&self, fields: &MovieFields) -> Result<Movie, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error>;

    /// Every movie, in identifier order.
    async fn find_all(&self) -> Result<Vec<Movie>, sqlx::Error>;

    /// Overwrite a movie's writable fields. `None` if it does not exist.
    async fn update(&self, id: DbId, fields: &MovieFields) -> Result<Option<Movie>, sqlx::Error>;

    /// Remove a movie. `false` if it did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// One sorted page plus the total row count.
    async fn find_page(&self, request: &PageRequest) -> Result<MoviePage, sqlx::Error>;

    /// Liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`MovieRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgMovieRepository {
    pool: DbPool,
}

impl PgMovieRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn insert(&self, fields: &MovieFields) -> Result<Movie, sqlx::Error> {
        MovieRepo::create(&self.pool, fields).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        MovieRepo::find_by_id(&self.pool, id).await
    }

    async fn find_all(&self) -> Result<Vec<Movie>, sqlx::Error> {
        MovieRepo::list_all(&self.pool).await
    }

    async fn update(&self, id: DbId, fields: &MovieFields) -> Result<Option<Movie>, sqlx::Error> {
        MovieRepo::update(&self.pool, id, fields).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        MovieRepo::delete(&self.pool, id).await
    }

    async fn find_page(&self, request: &PageRequest) -> Result<MoviePage, sqlx::Error> {
        MovieRepo::list_page(&self.pool, request).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
