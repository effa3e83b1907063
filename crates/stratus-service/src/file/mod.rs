//! File transfer and metadata operations.

pub mod service;

pub use service::{FileDownload, FileExport, FileService, RecentListing, UploadFile};
