//! Poster file storage.
//!
//! [`FileStore`] is the seam between the movie service and wherever poster
//! bytes live. [`LocalFileStore`] keeps them as flat files in one
//! configured directory. Name collisions are the caller's concern: an
//! upload overwrites any file of the same name.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::CoreError;
use crate::poster;

/// An uploaded file whose storage name has already been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Resolve the storage name for an upload.
    ///
    /// Keeps the client's filename when one is given, otherwise generates a
    /// unique name whose extension follows `content_type`.
    pub fn new(
        original_name: Option<&str>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let file_name = poster::resolve_filename(original_name, content_type)?;
        Ok(Self { file_name, bytes })
    }

    /// Name the file will be stored under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Storage backend for poster files, scoped to a single directory.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `file` and return the name it was stored under.
    async fn upload_file(&self, file: &UploadedFile) -> Result<String, CoreError>;

    /// Remove `file_name`. Absent files are not an error.
    async fn delete_file(&self, file_name: &str) -> Result<(), CoreError>;

    /// Read the contents of `file_name`.
    ///
    /// Fails with [`CoreError::FileNotFound`] when the file does not exist.
    async fn retrieve_file(&self, file_name: &str) -> Result<Vec<u8>, CoreError>;

    /// Whether `file_name` currently exists.
    async fn exists(&self, file_name: &str) -> Result<bool, CoreError>;
}

/// Local filesystem storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first upload.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a bare filename onto the storage directory.
    fn path_for(&self, file_name: &str) -> Result<PathBuf, CoreError> {
        poster::validate_filename(file_name)?;
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload_file(&self, file: &UploadedFile) -> Result<String, CoreError> {
        let path = self.path_for(file.file_name())?;
        fs::create_dir_all(&self.root).await?;

        let mut out = fs::File::create(&path).await?;
        out.write_all(file.bytes()).await?;
        out.sync_all().await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = file.bytes().len(),
            "Stored file"
        );
        Ok(file.file_name().to_string())
    }

    async fn delete_file(&self, file_name: &str) -> Result<(), CoreError> {
        let path = self.path_for(file_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    async fn retrieve_file(&self, file_name: &str) -> Result<Vec<u8>, CoreError> {
        let path = self.path_for(file_name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CoreError::FileNotFound(file_name.to_string()))
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    async fn exists(&self, file_name: &str) -> Result<bool, CoreError> {
        let path = self.path_for(file_name)?;
        Ok(fs::try_exists(&path).await?)
    }
}
