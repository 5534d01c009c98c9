use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Durable storage for uploaded media files, addressed by logical path.
///
/// Logical paths are relative, slash-separated strings (e.g.
/// `journal/12_a3f9_cat.png`). Callers are responsible for choosing paths
/// that do not collide; implementations reject traversal and absolute paths.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store bytes at the given logical path. Returns the byte count written.
    async fn put(&self, path: &str, data: &[u8]) -> Result<u64, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(path, reader).await
    }

    /// Stream data to the given logical path. Returns the exact number of
    /// bytes received, which is also the on-disk file size.
    async fn put_stream(&self, path: &str, reader: BoxReader) -> Result<u64, StorageError>;

    /// Retrieve a file as a streaming async reader.
    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError>;

    /// Check whether a file exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete a file by logical path.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Get the size of a stored file in bytes.
    async fn size(&self, path: &str) -> Result<u64, StorageError>;
}
