//! Paging and sorting rules for movie listings.
//!
//! A page request is zero-based. Sorting is restricted to a closed set of
//! fields so the column name can be spliced into SQL safely. Rows with
//! equal sort keys are ordered by identifier, which keeps pages stable.

use crate::error::CoreError;

/// Default zero-based page number.
pub const DEFAULT_PAGE_NUMBER: i64 = 0;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Default sort field parameter value.
pub const DEFAULT_SORT_BY: &str = "movieId";

/// Default sort direction parameter value.
pub const DEFAULT_SORT_DIR: &str = "asc";

/// Fields a movie listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    MovieId,
    Title,
    Director,
    Studio,
    ReleaseYear,
    Poster,
}

impl SortField {
    /// Parse a client-supplied field name. Accepts camelCase wire names and
    /// snake_case column names.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name.trim() {
            "movieId" | "movie_id" | "id" => Ok(Self::MovieId),
            "title" => Ok(Self::Title),
            "director" => Ok(Self::Director),
            "studio" => Ok(Self::Studio),
            "releaseYear" | "release_year" => Ok(Self::ReleaseYear),
            "poster" => Ok(Self::Poster),
            other => Err(CoreError::Validation(format!(
                "Cannot sort by '{other}'. Must be one of: movieId, title, director, studio, releaseYear, poster"
            ))),
        }
    }

    /// Column name in the `movies` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::MovieId => "movie_id",
            Self::Title => "title",
            Self::Director => "director",
            Self::Studio => "studio",
            Self::ReleaseYear => "release_year",
            Self::Poster => "poster",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `"asc"` in any casing is ascending; every other value is descending.
    pub fn from_param(dir: &str) -> Self {
        if dir.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A validated request for one page of movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Build an unsorted (identifier-ordered) page request.
    ///
    /// `page` must be non-negative and `size` at least 1. There is no upper
    /// bound on `size`.
    pub fn new(page: i64, size: i64) -> Result<Self, CoreError> {
        if page < 0 {
            return Err(CoreError::Validation(format!(
                "Page number must not be negative (got {page})"
            )));
        }
        if size < 1 {
            return Err(CoreError::Validation(format!(
                "Page size must be at least 1 (got {size})"
            )));
        }
        Ok(Self {
            page,
            size,
            sort: SortField::default(),
            direction: SortDirection::default(),
        })
    }

    /// Return a copy of this request sorted by `sort` in `direction`.
    pub fn sorted_by(self, sort: SortField, direction: SortDirection) -> Self {
        Self {
            sort,
            direction,
            ..self
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    /// Number of rows to return.
    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Derived page metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total_pages: i64,
    pub is_last: bool,
}

impl PageMeta {
    /// Compute total pages and the last-page flag for `request` over
    /// `total_elements` rows.
    ///
    /// `is_last` holds iff `(page + 1) * size >= total_elements`, so a page
    /// past the end also reports itself as last.
    pub fn compute(request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements <= 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        let next_offset = (request.page.saturating_add(1)).saturating_mul(request.size);
        Self {
            total_pages,
            is_last: next_offset >= total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_wire_and_column_names() {
        assert_eq!(SortField::parse("releaseYear").unwrap(), SortField::ReleaseYear);
        assert_eq!(SortField::parse("release_year").unwrap(), SortField::ReleaseYear);
        assert_eq!(SortField::parse("movieId").unwrap().column(), "movie_id");
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert_matches!(
            SortField::parse("title; DROP TABLE movies"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn direction_is_case_insensitive_and_defaults_to_desc() {
        assert_eq!(SortDirection::from_param("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("sideways"), SortDirection::Desc);
    }

    #[test]
    fn rejects_negative_page_and_bad_size() {
        assert_matches!(PageRequest::new(-1, 10), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::new(0, 0), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::new(0, -5), Err(CoreError::Validation(_)));
    }

    #[test]
    fn large_page_size_is_accepted() {
        let req = PageRequest::new(0, 150).unwrap();
        assert_eq!(req.limit(), 150);
        assert_eq!(PageMeta::compute(&req, 120).total_pages, 1);
    }

    #[test]
    fn offset_is_page_times_size() {
        let req = PageRequest::new(3, 10).unwrap();
        assert_eq!(req.offset(), 30);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn meta_for_partial_last_page() {
        let req = PageRequest::new(2, 10).unwrap();
        let meta = PageMeta::compute(&req, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.is_last);
    }

    #[test]
    fn meta_for_middle_page() {
        let req = PageRequest::new(1, 10).unwrap();
        let meta = PageMeta::compute(&req, 25);
        assert!(!meta.is_last);
    }

    #[test]
    fn meta_for_exact_boundary() {
        let req = PageRequest::new(1, 5).unwrap();
        let meta = PageMeta::compute(&req, 10);
        assert_eq!(meta.total_pages, 2);
        assert!(meta.is_last);
    }

    #[test]
    fn meta_for_empty_set() {
        let req = PageRequest::new(0, 10).unwrap();
        let meta = PageMeta::compute(&req, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(meta.is_last);
    }
}
