//! Field rules for movie records.
//!
//! Title, director, studio and poster are required and must not be blank.
//! The title is capped at [`MAX_TITLE_LEN`] characters to match the
//! `VARCHAR(200)` column. Cast members form a set: blanks are dropped and
//! duplicates collapse.

use std::collections::BTreeSet;

use crate::error::CoreError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Entity name used in `NotFound` errors.
pub const MOVIE_ENTITY: &str = "Movie";

/// Validate the descriptive fields of a movie.
///
/// The poster is validated separately (see [`crate::poster`]) because the
/// server assigns it from the uploaded file.
pub fn validate_movie_fields(title: &str, director: &str, studio: &str) -> Result<(), CoreError> {
    require_non_blank("title", title)?;
    require_non_blank("director", director)?;
    require_non_blank("studio", studio)?;

    let title_len = title.chars().count();
    if title_len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters (got {title_len})"
        )));
    }
    Ok(())
}

/// Ensure a required text field has at least one non-whitespace character.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("Please provide the movie {field}")))
    } else {
        Ok(())
    }
}

/// Normalize cast members into a set: trimmed, blanks removed, deduplicated.
pub fn normalize_cast<I, S>(members: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    members
        .into_iter()
        .map(|m| m.as_ref().trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}
