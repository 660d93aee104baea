//! Domain model structs and DTOs.
//!
//! - [`movie::Movie`]: the persisted row shape
//! - [`movie::MovieFields`]: the writable columns, used for insert and update
//! - [`movie::MovieDto`]: the API transfer shape with the derived poster URL

pub mod movie;
