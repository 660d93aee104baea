//! Use-case services shared by the HTTP handlers.

pub mod movie_service;

pub use movie_service::MovieService;
