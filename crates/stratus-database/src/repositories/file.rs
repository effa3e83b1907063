//! File repository implementation.
//!
//! The content-category predicate used here must agree with
//! [`FileCategory::of`]; the test module pins that equivalence against a
//! real database.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use stratus_core::error::{AppError, ErrorKind};
use stratus_core::result::AppResult;
use stratus_core::types::category::DOCUMENT_CONTENT_TYPES;
use stratus_core::types::{FileFilter, PageRequest};
use stratus_entity::file::{CreateFile, File};

/// Repository for file metadata rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a file by ID, visible only to its owner.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List all files in a folder (or at the root when `folder_id` is
    /// `None`) passing the filter, newest upload first.
    pub async fn find_by_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        filter: FileFilter,
    ) -> AppResult<Vec<File>> {
        let sql = format!(
            "SELECT * FROM files WHERE owner_id = ?{}{} ORDER BY uploaded_at DESC",
            folder_clause(folder_id),
            filter_clause(filter),
        );

        bind_folder(sqlx::query_as::<_, File>(&sql).bind(owner_id), folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// List one page of files in a folder passing the filter, newest
    /// upload first.
    pub async fn find_page_by_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        filter: FileFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<File>> {
        let sql = format!(
            "SELECT * FROM files WHERE owner_id = ?{}{} ORDER BY uploaded_at DESC LIMIT ? OFFSET ?",
            folder_clause(folder_id),
            filter_clause(filter),
        );

        bind_folder(sqlx::query_as::<_, File>(&sql).bind(owner_id), folder_id)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Check whether a folder directly contains at least one file passing
    /// the filter.
    pub async fn exists_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Uuid,
        filter: FileFilter,
    ) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM files WHERE owner_id = ? AND folder_id = ?{})",
            filter_clause(filter),
        );

        sqlx::query_scalar::<_, bool>(&sql)
            .bind(owner_id)
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to probe folder", e))
    }

    /// The most recently uploaded files across all folders.
    pub async fn find_recent(
        &self,
        owner_id: Uuid,
        filter: FileFilter,
        limit: u64,
    ) -> AppResult<Vec<File>> {
        let sql = format!(
            "SELECT * FROM files WHERE owner_id = ?{} ORDER BY uploaded_at DESC LIMIT ?",
            filter_clause(filter),
        );

        sqlx::query_as::<_, File>(&sql)
            .bind(owner_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list recent files", e)
            })
    }

    /// Count files directly inside a folder.
    pub async fn count_in_folder(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE folder_id = ? AND owner_id = ?")
                .bind(folder_id)
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count files", e)
                })?;
        Ok(count as u64)
    }

    /// Sum the byte sizes of files directly inside a folder.
    pub async fn sum_size_in_folder(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM files \
             WHERE folder_id = ? AND owner_id = ?",
        )
        .bind(folder_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sum file sizes", e))
    }

    /// Insert a new file record.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let file = File {
            id: Uuid::new_v4(),
            filename: data.filename.clone(),
            size_bytes: data.size_bytes,
            storage_key: data.storage_key.clone(),
            content_type: data.content_type.clone(),
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            uploaded_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO files \
             (id, filename, size_bytes, storage_key, content_type, owner_id, folder_id, uploaded_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(file.id)
        .bind(&file.filename)
        .bind(file.size_bytes)
        .bind(&file.storage_key)
        .bind(&file.content_type)
        .bind(file.owner_id)
        .bind(file.folder_id)
        .bind(file.uploaded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?;

        Ok(file)
    }

    /// Delete a file owned by the given user. Returns whether a row was
    /// removed.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// SQL fragment selecting the requested folder (`IS NULL` for the root).
fn folder_clause(folder_id: Option<Uuid>) -> &'static str {
    match folder_id {
        Some(_) => " AND folder_id = ?",
        None => " AND folder_id IS NULL",
    }
}

/// SQL fragment restricting rows to the filter's category.
///
/// SQLite's `LIKE` is ASCII case-insensitive by default, matching the
/// classifier's prefix rule; the PDF and document comparisons are exact,
/// also matching the classifier.
fn filter_clause(filter: FileFilter) -> String {
    let document_list = DOCUMENT_CONTENT_TYPES
        .iter()
        .map(|ct| format!("'{ct}'"))
        .collect::<Vec<_>>()
        .join(", ");

    match filter {
        FileFilter::All => String::new(),
        FileFilter::Image => " AND content_type LIKE 'image/%'".to_string(),
        FileFilter::Pdf => " AND content_type = 'application/pdf'".to_string(),
        FileFilter::Document => format!(" AND content_type IN ({document_list})"),
        FileFilter::Other => format!(
            " AND NOT (content_type LIKE 'image/%' \
             OR content_type = 'application/pdf' \
             OR content_type IN ({document_list}))"
        ),
    }
}

fn bind_folder<'q, O>(
    query: sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>,
    folder_id: Option<Uuid>,
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>> {
    match folder_id {
        Some(id) => query.bind(id),
        None => query,
    }
}
