//! Storage provider trait for pluggable file storage backends.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading stored object contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for blob storage backends.
///
/// Implementations exist for the local filesystem and S3. The trait is
/// defined here in `stratus-core` and implemented in `stratus-storage`.
/// Objects are addressed by an opaque key chosen at upload time.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read an object and return its byte stream.
    async fn read(&self, key: &str) -> AppResult<ByteStream>;

    /// Read an object into memory as a complete byte buffer.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Write bytes to an object at the given key.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Delete the object at the given key.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists at the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Produce a time-limited URL for downloading the object directly
    /// from the backend, or `None` if the backend cannot presign and the
    /// bytes must be served through the application.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> AppResult<Option<String>>;
}
