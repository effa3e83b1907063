//! HTTP request handlers, one module per route group.

pub mod auth;
pub mod file;
pub mod folder;
pub mod health;
pub mod listing;
pub mod search;

use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_core::types::FileFilter;

/// Parse an optional `filter` query value, defaulting to `all`.
pub(crate) fn parse_filter(value: Option<&str>) -> AppResult<FileFilter> {
    match value {
        None => Ok(FileFilter::All),
        Some(s) => s.parse(),
    }
}

/// Parse an optional `folder_id` query value. Absent or the literal
/// `"null"` selects the root level.
pub(crate) fn parse_folder_id(value: Option<&str>) -> AppResult<Option<Uuid>> {
    match value {
        None | Some("null") | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid folder id: {s}"))),
    }
}
