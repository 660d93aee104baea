//! Repository for the `movies` and `movie_cast` tables.
//!
//! A movie row and its cast rows are always written in one transaction.
//! Reads aggregate the cast into a sorted `TEXT[]`.

use movieflix_core::pagination::PageRequest;
use movieflix_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::movie::{Movie, MovieFields, MoviePage};

/// Column list for `movies m` queries, with the cast aggregated per row.
const MOVIE_COLUMNS: &str = "\
    m.movie_id, m.title, m.director, m.studio, m.release_year, m.poster, \
    ARRAY(SELECT c.cast_member FROM movie_cast c \
          WHERE c.movie_id = m.movie_id ORDER BY c.cast_member) AS movie_cast";

/// Provides CRUD and paged queries for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie and its cast, returning the stored row.
    pub async fn create(pool: &PgPool, input: &MovieFields) -> Result<Movie, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let movie_id: DbId = sqlx::query_scalar(
            "INSERT INTO movies (title, director, studio, release_year, poster) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING movie_id",
        )
        .bind(&input.title)
        .bind(&input.director)
        .bind(&input.studio)
        .bind(input.release_year)
        .bind(&input.poster)
        .fetch_one(&mut *tx)
        .await?;

        insert_cast(&mut tx, movie_id, &input.movie_cast).await?;
        let movie = fetch_in_tx(&mut tx, movie_id).await?;
        tx.commit().await?;

        tracing::debug!(movie_id, "Inserted movie");
        Ok(movie)
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.movie_id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every movie in identifier order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies m ORDER BY m.movie_id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Overwrite every writable column of a movie and replace its cast.
    ///
    /// Returns `None` if no movie with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MovieFields,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE movies SET \
                 title = $2, director = $3, studio = $4, release_year = $5, poster = $6 \
             WHERE movie_id = $1 \
             RETURNING movie_id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.director)
        .bind(&input.studio)
        .bind(input.release_year)
        .bind(&input.poster)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM movie_cast WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_cast(&mut tx, id, &input.movie_cast).await?;

        let movie = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(movie))
    }

    /// Delete a movie. Cast rows go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE movie_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of movies.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    /// Fetch one page ordered by the requested field, ties broken by ID.
    pub async fn list_page(pool: &PgPool, request: &PageRequest) -> Result<MoviePage, sqlx::Error> {
        // Column and direction come from closed enums, never from raw input.
        let query = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m \
             ORDER BY m.{col} {dir}, m.movie_id {dir} \
             LIMIT $1 OFFSET $2",
            col = request.sort.column(),
            dir = request.direction.as_sql(),
        );
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(pool)
            .await?;
        let total_elements = Self::count(pool).await?;

        Ok(MoviePage {
            movies,
            total_elements,
        })
    }
}

async fn insert_cast(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: DbId,
    cast: &[String],
) -> Result<(), sqlx::Error> {
    if cast.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO movie_cast (movie_id, cast_member) \
         SELECT $1, member FROM UNNEST($2::text[]) AS member \
         ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(cast)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn fetch_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: DbId,
) -> Result<Movie, sqlx::Error> {
    let query = format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.movie_id = $1");
    sqlx::query_as::<_, Movie>(&query)
        .bind(movie_id)
        .fetch_one(&mut **tx)
        .await
}
