pub mod file;
pub mod movie;
pub mod upload;
