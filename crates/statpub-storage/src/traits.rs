//! Storage abstraction trait
//!
//! Defines the read-side contract the import pipeline consumes from blob
//! storage. Backends implementing this trait must use the shared key layout
//! from the `keys` module.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Read-side storage contract.
///
/// Validators re-read content by downloading again (or via the buffered
/// `UploadedFile`), never by seeking a shared stream.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if a blob exists at the given key
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Read a blob's full content
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Read a blob as a stream of chunks, for large files
    async fn download_stream(
        &self,
        storage_key: &str,
    ) -> StorageResult<Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>>;

    /// Size in bytes of the blob, if it exists
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Delete a blob; deleting a missing key is a no-op
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;
}
