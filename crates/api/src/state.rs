use std::sync::Arc;

use movieflix_core::storage::FileStore;

use crate::services::MovieService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Movie use cases (store + poster files).
    pub movies: Arc<MovieService>,
    /// Poster file storage, also served directly under `/file`.
    pub files: Arc<dyn FileStore>,
}
