//! # stratus-core
//!
//! Core crate for Stratus. Contains traits, configuration schemas,
//! content-category and pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Stratus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
