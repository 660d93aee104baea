//! Query parameter types for the paged movie listings.
//!
//! Parameter names follow the camelCase wire convention
//! (`?pageNumber=&pageSize=&sortBy=&dir=`).

use movieflix_core::pagination::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIR,
};
use serde::Deserialize;

/// Pagination parameters (`?pageNumber=&pageSize=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

/// Pagination plus sorting (`?pageNumber=&pageSize=&sortBy=&dir=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedPageParams {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_dir")]
    pub dir: String,
}

fn default_page_number() -> i64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_sort_dir() -> String {
    DEFAULT_SORT_DIR.to_string()
}
