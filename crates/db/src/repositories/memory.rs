//! In-memory [`MovieRepository`] for running without PostgreSQL.
//!
//! Identifiers start at 1 and only ever increase, so a deleted movie's ID
//! is never handed out again. Cast lists are kept sorted and deduplicated,
//! matching what the PostgreSQL store returns.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use movieflix_core::pagination::{PageRequest, SortDirection, SortField};
use movieflix_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::movie::{Movie, MovieFields, MoviePage};
use crate::repositories::MovieRepository;

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    movies: BTreeMap<DbId, Movie>,
}

#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    inner: RwLock<Inner>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn build_movie(movie_id: DbId, fields: &MovieFields) -> Movie {
    let mut movie_cast = fields.movie_cast.clone();
    movie_cast.sort();
    movie_cast.dedup();
    Movie {
        movie_id,
        title: fields.title.clone(),
        director: fields.director.clone(),
        studio: fields.studio.clone(),
        movie_cast,
        release_year: fields.release_year,
        poster: fields.poster.clone(),
    }
}

fn compare_by(field: SortField, a: &Movie, b: &Movie) -> Ordering {
    match field {
        SortField::MovieId => a.movie_id.cmp(&b.movie_id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Director => a.director.cmp(&b.director),
        SortField::Studio => a.studio.cmp(&b.studio),
        SortField::ReleaseYear => a.release_year.cmp(&b.release_year),
        SortField::Poster => a.poster.cmp(&b.poster),
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn insert(&self, fields: &MovieFields) -> Result<Movie, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let movie = build_movie(inner.last_id, fields);
        inner.movies.insert(movie.movie_id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        Ok(self.inner.read().await.movies.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, sqlx::Error> {
        Ok(self.inner.read().await.movies.values().cloned().collect())
    }

    async fn update(&self, id: DbId, fields: &MovieFields) -> Result<Option<Movie>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        match inner.movies.get_mut(&id) {
            Some(slot) => {
                *slot = build_movie(id, fields);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.movies.remove(&id).is_some())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<MoviePage, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut movies: Vec<&Movie> = inner.movies.values().collect();
        movies.sort_by(|a, b| {
            let ord = compare_by(request.sort, a, b).then(a.movie_id.cmp(&b.movie_id));
            match request.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(0);
        Ok(MoviePage {
            movies: movies.into_iter().skip(offset).take(limit).cloned().collect(),
            total_elements: inner.movies.len() as i64,
        })
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, year: i32) -> MovieFields {
        MovieFields {
            title: title.into(),
            director: "Director".into(),
            studio: "Studio".into(),
            movie_cast: vec!["B".into(), "A".into(), "B".into()],
            release_year: year,
            poster: format!("{}.jpg", title.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let repo = InMemoryMovieRepository::new();
        let first = repo.insert(&fields("One", 2000)).await.unwrap();
        assert!(repo.delete(first.movie_id).await.unwrap());

        let second = repo.insert(&fields("Two", 2001)).await.unwrap();
        assert!(second.movie_id > first.movie_id);
    }

    #[tokio::test]
    async fn cast_is_sorted_and_unique() {
        let repo = InMemoryMovieRepository::new();
        let movie = repo.insert(&fields("One", 2000)).await.unwrap();
        assert_eq!(movie.movie_cast, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let repo = InMemoryMovieRepository::new();
        assert!(repo.update(42, &fields("X", 1)).await.unwrap().is_none());
        assert!(!repo.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn page_sorted_descending_by_field() {
        let repo = InMemoryMovieRepository::new();
        for (title, year) in [("B", 2001), ("A", 2003), ("C", 2002)] {
            repo.insert(&fields(title, year)).await.unwrap();
        }

        let request = PageRequest::new(0, 2)
            .unwrap()
            .sorted_by(SortField::ReleaseYear, SortDirection::Desc);
        let page = repo.find_page(&request).await.unwrap();

        let years: Vec<i32> = page.movies.iter().map(|m| m.release_year).collect();
        assert_eq!(years, vec![2003, 2002]);
        assert_eq!(page.total_elements, 3);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let repo = InMemoryMovieRepository::new();
        repo.insert(&fields("A", 2000)).await.unwrap();

        let page = repo.find_page(&PageRequest::new(5, 10).unwrap()).await.unwrap();
        assert!(page.movies.is_empty());
        assert_eq!(page.total_elements, 1);
    }
}
