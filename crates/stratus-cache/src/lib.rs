//! # stratus-cache
//!
//! Cache provider implementation for Stratus, built on
//! [moka](https://crates.io/crates/moka). The [`CacheManager`] wraps the
//! backend behind the `CacheProvider` trait so callers (most importantly
//! the refresh-token revocation store) never depend on the concrete
//! implementation.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
