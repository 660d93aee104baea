//! Repository layer.
//!
//! [`MovieRepo`] is a zero-sized struct providing async queries that accept
//! `&PgPool` as the first argument. [`MovieRepository`] is the object-safe
//! store trait the service layer depends on; [`PgMovieRepository`] and
//! [`InMemoryMovieRepository`] implement it.

pub mod memory;
pub mod movie_repo;
pub mod movie_store;

pub use memory::InMemoryMovieRepository;
pub use movie_repo::MovieRepo;
pub use movie_store::{MovieRepository, PgMovieRepository};
