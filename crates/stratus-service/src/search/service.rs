//! Recursive name search across a user's whole folder tree.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_core::types::FileFilter;
use stratus_database::repositories::{FileRepository, FolderRepository};
use stratus_entity::file::File;
use stratus_entity::folder::Folder;

use crate::folder::{FolderContentMatcher, MAX_TRAVERSAL_DEPTH};

/// Path label for items sitting directly at the root level.
const ROOT_PATH: &str = "Root";

/// A file or folder matched by search, annotated with the slash-joined
/// names of its ancestor folders (`"Root"` for top-level items).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchHit {
    /// A matched file.
    File {
        /// The file record.
        #[serde(flatten)]
        file: File,
        /// Ancestor folder path.
        folder_path: String,
    },
    /// A matched folder.
    Folder {
        /// The folder record.
        #[serde(flatten)]
        folder: Folder,
        /// Ancestor folder path.
        folder_path: String,
    },
}

impl SearchHit {
    /// The matched item's name.
    pub fn name(&self) -> &str {
        match self {
            Self::File { file, .. } => &file.filename,
            Self::Folder { folder, .. } => &folder.name,
        }
    }

    /// The matched item's ancestor path.
    pub fn folder_path(&self) -> &str {
        match self {
            Self::File { folder_path, .. } | Self::Folder { folder_path, .. } => folder_path,
        }
    }
}

/// Walks the entire folder tree collecting name matches.
///
/// Pre-order, sequential: at each level, child folders are evaluated in
/// listing order and each one is expanded in place before moving on;
/// the level's files follow. A fetch failure anywhere aborts the whole
/// search with no partial results.
#[derive(Debug, Clone)]
pub struct SearchService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    matcher: FolderContentMatcher,
}

impl SearchService {
    /// Create a new search service.
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

    /// Find every owned file/folder whose name contains `query` as a
    /// case-insensitive substring, restricted by `filter`.
    ///
    /// An empty or whitespace-only query returns an empty result set
    /// without touching the store.
    pub async fn search(
        &self,
        owner_id: Uuid,
        query: &str,
        filter: FileFilter,
    ) -> AppResult<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = Vec::new();
        self.walk(owner_id, None, String::new(), &needle, filter, 0, &mut hits)
            .await?;
        Ok(hits)
    }

    #[allow(clippy::too_many_arguments)]
    fn walk<'a>(
        &'a self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        path: String,
        needle: &'a str,
        filter: FileFilter,
        depth: usize,
        hits: &'a mut Vec<SearchHit>,
    ) -> BoxFuture<'a, AppResult<()>> {
        Box::pin(async move {
            if depth > MAX_TRAVERSAL_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum traversal depth",
                ));
            }

            let display_path = if path.is_empty() {
                ROOT_PATH.to_string()
            } else {
                path.clone()
            };

            let folders = self.folder_repo.find_by_parent(owner_id, folder_id).await?;
            for folder in folders {
                if !filter.is_all()
                    && !self
                        .matcher
                        .folder_matches(folder.id, owner_id, filter)
                        .await?
                {
                    continue;
                }

                if folder.name.to_lowercase().contains(needle) {
                    hits.push(SearchHit::Folder {
                        folder_path: display_path.clone(),
                        folder: folder.clone(),
                    });
                }

                let child_path = if path.is_empty() {
                    folder.name.clone()
                } else {
                    format!("{path}/{}", folder.name)
                };
                self.walk(
                    owner_id,
                    Some(folder.id),
                    child_path,
                    needle,
                    filter,
                    depth + 1,
                    hits,
                )
                .await?;
            }

            let files = self
                .file_repo
                .find_by_folder(owner_id, folder_id, filter)
                .await?;
            for file in files {
                if file.filename.to_lowercase().contains(needle) {
                    hits.push(SearchHit::File {
                        folder_path: display_path.clone(),
                        file,
                    });
                }
            }

            Ok(())
        })
    }
}
