//! # stratus-database
//!
//! SQLite connection management and concrete repository implementations
//! for all Stratus entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
