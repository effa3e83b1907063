//! Recursive tree search with path annotation.

pub mod service;

pub use service::{SearchHit, SearchService};
