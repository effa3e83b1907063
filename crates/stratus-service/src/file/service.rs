//! File upload, download, export, and deletion.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_core::traits::storage::ByteStream;
use stratus_core::types::FileFilter;
use stratus_database::repositories::{FileRepository, FolderRepository};
use stratus_entity::file::{CreateFile, File};
use stratus_entity::folder::Folder;
use stratus_storage::StorageManager;

use crate::folder::FolderContentMatcher;
use stratus_core::traits::StorageProvider;
use stratus_core::types::PageRequest;

/// Input for a completed upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name.
    pub filename: String,
    /// MIME type reported by the client.
    pub content_type: String,
    /// Target folder (`None` for root level).
    pub folder_id: Option<Uuid>,
    /// The file contents.
    pub data: Bytes,
}

/// A time-limited download URL for a stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileExport {
    /// The URL to fetch the bytes from.
    pub url: String,
    /// Original file name.
    pub filename: String,
}

/// An open download: the file record plus its byte stream.
pub struct FileDownload {
    /// The file record.
    pub file: File,
    /// Streamed object contents.
    pub stream: ByteStream,
}

/// The most recent items across a user's drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentListing {
    /// Most recently created root-level folders.
    pub folders: Vec<Folder>,
    /// Most recently uploaded files across all folders.
    pub files: Vec<File>,
}

/// Handles file CRUD against the entity store and the storage backend.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    storage: Arc<StorageManager>,
    matcher: FolderContentMatcher,
}

impl FileService {
    /// Create a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        storage: Arc<StorageManager>,
        matcher: FolderContentMatcher,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
            matcher,
        }
    }

    /// Store an uploaded file: write the bytes to the storage backend,
    /// then insert the metadata row. A storage failure leaves no row
    /// behind.
    pub async fn upload(&self, owner_id: Uuid, upload: UploadFile) -> AppResult<File> {
        if upload.filename.trim().is_empty() {
            return Err(AppError::validation("File name is required"));
        }

        if let Some(folder) = upload.folder_id {
            self.folder_repo
                .find_by_id(folder, owner_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let storage_key = format!("{owner_id}/{}_{}", Uuid::new_v4(), upload.filename);
        let size_bytes = upload.data.len() as i64;

        self.storage.write(&storage_key, upload.data).await?;

        let file = self
            .file_repo
            .create(&CreateFile {
                filename: upload.filename,
                size_bytes,
                storage_key,
                content_type: upload.content_type,
                owner_id,
                folder_id: upload.folder_id,
            })
            .await?;

        info!(
            user_id = %owner_id,
            file_id = %file.id,
            size_bytes,
            "File uploaded"
        );
        Ok(file)
    }

    /// Look up a file visible to its owner.
    pub async fn get_file(&self, id: Uuid, owner_id: Uuid) -> AppResult<File> {
        self.file_repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Delete a file: remove the storage object first, then the row.
    /// A storage failure aborts before the row is touched.
    pub async fn delete_file(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let file = self.get_file(id, owner_id).await?;

        self.storage.delete(&file.storage_key).await?;
        self.file_repo.delete(id, owner_id).await?;

        info!(user_id = %owner_id, file_id = %id, "File deleted");
        Ok(())
    }

    /// Produce a download URL for a file: a presigned backend URL when
    /// the provider supports it, otherwise the application download
    /// route.
    pub async fn export_file(&self, id: Uuid, owner_id: Uuid) -> AppResult<FileExport> {
        let file = self.get_file(id, owner_id).await?;

        let url = match self
            .storage
            .presign_get(&file.storage_key, self.storage.download_url_ttl())
            .await?
        {
            Some(presigned) => presigned,
            None => format!("/api/files/{id}/download"),
        };

        Ok(FileExport {
            url,
            filename: file.filename,
        })
    }

    /// Open a file's contents for streaming to the client.
    pub async fn download_file(&self, id: Uuid, owner_id: Uuid) -> AppResult<FileDownload> {
        let file = self.get_file(id, owner_id).await?;
        let stream = self.storage.read(&file.storage_key).await?;
        Ok(FileDownload { file, stream })
    }

    /// The most recent root-level folders and files across all folders,
    /// each list capped at `limit`. Folders are content-filtered the
    /// same way listings filter them.
    pub async fn recent(
        &self,
        owner_id: Uuid,
        filter: FileFilter,
        limit: u64,
    ) -> AppResult<RecentListing> {
        let page = PageRequest::try_new(1, limit)?;

        let candidates = self
            .folder_repo
            .find_page_by_parent(owner_id, None, &page)
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

        let files = self.file_repo.find_recent(owner_id, filter, limit).await?;

        Ok(RecentListing { folders, files })
    }
}
