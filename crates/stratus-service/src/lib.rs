//! # stratus-service
//!
//! Domain services for Stratus. Each service owns one slice of behavior:
//! account lifecycle (`auth`), folder tree operations (`folder`),
//! filtered listings (`listing`), recursive search (`search`), and file
//! transfer (`file`). Services take an already-verified owner ID; they
//! never authenticate.

pub mod auth;
pub mod file;
pub mod folder;
pub mod listing;
pub mod search;

pub use auth::AuthService;
pub use file::FileService;
pub use folder::{FolderContentMatcher, FolderService};
pub use listing::{Listing, ListingService};
pub use search::{SearchHit, SearchService};
