//! Storage manager wrapping the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use stratus_core::config::StorageConfig;
use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_core::traits::storage::{ByteStream, StorageProvider};

/// Storage manager that wraps the configured provider behind the trait
/// object, mirroring how the cache manager wraps its backend.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// The inner storage provider.
    inner: Arc<dyn StorageProvider>,
    /// Expiry applied to generated download URLs.
    download_url_ttl: Duration,
}

impl StorageManager {
    /// Create a storage manager from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn StorageProvider> = match config.provider.as_str() {
            "local" => {
                info!(root = %config.local.root_path, "Using local storage provider");
                Arc::new(crate::providers::LocalStorageProvider::new(&config.local).await?)
            }
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3StorageProvider::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: {other}"
                )));
            }
        };

        Ok(Self {
            inner,
            download_url_ttl: Duration::from_secs(config.download_url_ttl_seconds),
        })
    }

    /// Create a storage manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn StorageProvider>, download_url_ttl: Duration) -> Self {
        Self {
            inner: provider,
            download_url_ttl,
        }
    }

    /// The configured expiry for generated download URLs.
    pub fn download_url_ttl(&self) -> Duration {
        self.download_url_ttl
    }
}

#[async_trait]
impl StorageProvider for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        self.inner.read(key).await
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(key).await
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.write(key, data).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> AppResult<Option<String>> {
        self.inner.presign_get(key, expires_in).await
    }
}
