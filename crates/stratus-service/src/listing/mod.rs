//! Paginated, filterable folder-content listings.

pub mod service;

pub use service::{Listing, ListingService};
