//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Maximum page size the HTTP layer will accept.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
///
/// Both fields are 1-based and must be positive; [`PageRequest::try_new`]
/// rejects zero values instead of clamping them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a page request, rejecting non-positive values.
    pub fn try_new(page: u64, page_size: u64) -> AppResult<Self> {
        if page == 0 {
            return Err(AppError::validation("page must be a positive integer"));
        }
        if page_size == 0 {
            return Err(AppError::validation("limit must be a positive integer"));
        }
        Ok(Self { page, page_size })
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
