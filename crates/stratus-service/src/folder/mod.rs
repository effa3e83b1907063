//! Folder tree operations: creation, deletion, subtree sizing, and the
//! recursive content matcher used by listings and search.

pub mod matcher;
pub mod service;

pub use matcher::FolderContentMatcher;
pub use service::FolderService;

/// Traversal depth guard for recursive folder walks.
///
/// The tree is acyclic by construction (folders are never re-parented),
/// so this only fires if that invariant is ever broken.
pub const MAX_TRAVERSAL_DEPTH: usize = 64;
