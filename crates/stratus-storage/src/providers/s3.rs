//! S3-compatible object storage provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use stratus_core::config::S3StorageConfig;
use stratus_core::error::{AppError, ErrorKind};
use stratus_core::result::AppResult;
use stratus_core::traits::storage::{ByteStream, StorageProvider};

/// S3-compatible storage provider.
///
/// Works against AWS S3 or any path-style-compatible service (MinIO)
/// when an explicit endpoint is configured.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    /// Create a new S3 provider from configuration. Credentials come from
    /// the standard AWS environment/profile chain.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("S3 bucket is not configured"));
        }

        info!(
            bucket = %config.bucket,
            region = %config.region,
            "Initializing S3 storage provider"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if !config.region.is_empty() {
            loader = loader.region(Region::new(config.region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let result = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await;
        Ok(result.is_ok())
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    AppError::not_found(format!("Object not found: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to read object: {key}"),
                        service_err,
                    )
                }
            })?;

        let reader = output.body.into_async_read();
        let stream = ReaderStream::new(reader);
        Ok(Box::pin(stream.map(|r| r.map(|b| b.into()))))
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    AppError::not_found(format!("Object not found: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to read object: {key}"),
                        service_err,
                    )
                }
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to collect object body: {key}"),
                e,
            )
        })?;
        Ok(data.into_bytes())
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        let len = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.into())
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write object: {key}"),
                    e.into_service_error(),
                )
            })?;

        debug!(key, bytes = len, "Wrote object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {key}"),
                    e.into_service_error(),
                )
            })?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to check object: {key}"),
                        service_err,
                    ))
                }
            }
        }
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> AppResult<Option<String>> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presign expiry", e)
        })?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign object: {key}"),
                    e.into_service_error(),
                )
            })?;

        Ok(Some(request.uri().to_string()))
    }
}
