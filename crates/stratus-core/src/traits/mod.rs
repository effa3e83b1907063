//! Trait definitions implemented by the provider crates.

pub mod cache;
pub mod storage;

pub use cache::CacheProvider;
pub use storage::{ByteStream, StorageProvider};
