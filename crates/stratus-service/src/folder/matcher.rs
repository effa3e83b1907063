//! Recursive folder-content matching.

use std::sync::Arc;

use futures::future::BoxFuture;
use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_core::types::FileFilter;
use stratus_database::repositories::{FileRepository, FolderRepository};

use super::MAX_TRAVERSAL_DEPTH;

/// Determines whether a folder subtree contains at least one file
/// matching a filter.
///
/// Depth-first with short-circuiting: direct files are probed first
/// (a single existence query), then each child folder is recursed into
/// until the first positive. A repository error anywhere aborts the
/// whole computation; it is never reported as "no match".
#[derive(Debug, Clone)]
pub struct FolderContentMatcher {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
}

impl FolderContentMatcher {
    /// Create a new matcher over the given repositories.
    pub fn new(file_repo: Arc<FileRepository>, folder_repo: Arc<FolderRepository>) -> Self {
        Self {
            file_repo,
            folder_repo,
        }
    }

    /// True iff the filter is `All`, or the folder or any descendant
    /// directly contains a file owned by `owner_id` matching `filter`.
    pub async fn folder_matches(
        &self,
        folder_id: Uuid,
        owner_id: Uuid,
        filter: FileFilter,
    ) -> AppResult<bool> {
        if filter.is_all() {
            return Ok(true);
        }
        self.matches_at_depth(folder_id, owner_id, filter, 0).await
    }

    fn matches_at_depth(
        &self,
        folder_id: Uuid,
        owner_id: Uuid,
        filter: FileFilter,
        depth: usize,
    ) -> BoxFuture<'_, AppResult<bool>> {
        Box::pin(async move {
            if depth > MAX_TRAVERSAL_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum traversal depth",
                ));
            }

            if self
                .file_repo
                .exists_in_folder(owner_id, folder_id, filter)
                .await?
            {
                return Ok(true);
            }

            let children = self.folder_repo.find_by_parent(owner_id, Some(folder_id)).await?;
            for child in children {
                if self
                    .matches_at_depth(child.id, owner_id, filter, depth + 1)
                    .await?
                {
                    return Ok(true);
                }
            }

            Ok(false)
        })
    }
}
