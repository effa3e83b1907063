//! Folder content listing with pagination and category filtering.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_core::types::{FileFilter, PageRequest};
use stratus_database::repositories::{FileRepository, FolderRepository};
use stratus_entity::file::File;
use stratus_entity::folder::Folder;

use crate::folder::FolderContentMatcher;

/// One page of a folder's direct children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Files in the requested folder matching the filter, newest upload
    /// first.
    pub files: Vec<File>,
    /// Child folders, newest first. With a non-`all` filter, restricted
    /// to folders whose subtree contains a matching file.
    pub folders: Vec<Folder>,
}

/// Produces paginated listings of a folder's direct children.
#[derive(Debug, Clone)]
pub struct ListingService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    matcher: FolderContentMatcher,
}

impl ListingService {
    /// Create a new listing service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        matcher: FolderContentMatcher,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            matcher,
        }
    }

    /// List the direct children of a folder (`None` = root level).
    ///
    /// Both the file and folder windows are sliced by the same page
    /// request. The folder content filter is applied after the page is
    /// sliced, so a page of folders can undershoot the limit while more
    /// matching folders exist beyond it; pagination windows stay cheap
    /// and stable in exchange.
    pub async fn list(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        page: &PageRequest,
        filter: FileFilter,
    ) -> AppResult<Listing> {
        if let Some(id) = folder_id {
            self.folder_repo
                .find_by_id(id, owner_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let files = self
            .file_repo
            .find_page_by_folder(owner_id, folder_id, filter, page)
            .await?;

        let candidates = self
            .folder_repo
            .find_page_by_parent(owner_id, folder_id, page)
            .await?;

        let folders = if filter.is_all() {
            candidates
        } else {
            let mut kept = Vec::with_capacity(candidates.len());
            for folder in candidates {
                if self
                    .matcher
                    .folder_matches(folder.id, owner_id, filter)
                    .await?
                {
                    kept.push(folder);
                }
            }
            kept
        };

        Ok(Listing { files, folders })
    }
}
