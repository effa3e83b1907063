//! # stratus-storage
//!
//! Blob storage backends for Stratus. The local filesystem provider is
//! always available; the S3 provider is gated behind the `s3` feature.
//! Both implement the `StorageProvider` trait from `stratus-core`.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
pub use providers::LocalStorageProvider;
#[cfg(feature = "s3")]
pub use providers::S3StorageProvider;
