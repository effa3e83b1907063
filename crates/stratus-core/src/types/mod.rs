//! Core type definitions used across the Stratus workspace.

pub mod category;
pub mod pagination;

pub use category::{FileCategory, FileFilter};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
