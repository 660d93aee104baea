//! Domain rules for the movie catalog.
//!
//! Everything here is storage- and transport-agnostic: error kinds, field
//! validation, poster filename and URL rules, paging and sorting rules, and
//! the [`storage::FileStore`] seam used for poster files.

pub mod error;
pub mod movie;
pub mod pagination;
pub mod poster;
pub mod storage;
pub mod types;
