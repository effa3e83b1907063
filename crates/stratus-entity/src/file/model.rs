//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use stratus_core::types::FileCategory;

/// A file stored in Stratus.
///
/// The row records metadata only; the bytes live in the storage backend
/// under `storage_key`. Deleting a file never changes folder structure.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file name (including extension).
    pub filename: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Object key within the storage backend.
    pub storage_key: String,
    /// MIME type as reported at upload time.
    pub content_type: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// The containing folder (`None` for root-level files).
    pub folder_id: Option<Uuid>,
    /// When the upload completed.
    pub uploaded_at: DateTime<Utc>,
}

impl File {
    /// The content category this file is classified under.
    pub fn category(&self) -> FileCategory {
        FileCategory::of(&self.content_type)
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub filename: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Object key within the storage backend.
    pub storage_key: String,
    /// MIME type.
    pub content_type: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// The containing folder (`None` for root level).
    pub folder_id: Option<Uuid>,
}
