//! Folder repository implementation.
//!
//! Every query is scoped by owner id so that one user's traversal can
//! never observe another user's tree.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use stratus_core::error::{AppError, ErrorKind};
use stratus_core::result::AppResult;
use stratus_core::types::PageRequest;
use stratus_entity::folder::{CreateFolder, Folder};

/// Repository for folder rows and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID, visible only to its owner.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List all direct children of a folder (or of the root when
    /// `parent_id` is `None`), newest first.
    pub async fn find_by_parent(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        let mut sql = String::from("SELECT * FROM folders WHERE owner_id = ?");
        match parent_id {
            Some(_) => sql.push_str(" AND parent_id = ?"),
            None => sql.push_str(" AND parent_id IS NULL"),
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, Folder>(&sql).bind(owner_id);
        if let Some(parent) = parent_id {
            query = query.bind(parent);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// List one page of direct children of a folder, newest first.
    pub async fn find_page_by_parent(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<Vec<Folder>> {
        let mut sql = String::from("SELECT * FROM folders WHERE owner_id = ?");
        match parent_id {
            Some(_) => sql.push_str(" AND parent_id = ?"),
            None => sql.push_str(" AND parent_id IS NULL"),
        }
        sql.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, Folder>(&sql).bind(owner_id);
        if let Some(parent) = parent_id {
            query = query.bind(parent);
        }

        query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Count direct child folders.
    pub async fn count_children(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folders WHERE parent_id = ? AND owner_id = ?",
        )
        .bind(folder_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))?;
        Ok(count as u64)
    }

    /// Insert a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO folders (id, name, owner_id, parent_id, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.owner_id)
        .bind(folder.parent_id)
        .bind(folder.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?;

        Ok(folder)
    }

    /// Delete a folder owned by the given user. Returns whether a row was
    /// removed. Emptiness is checked by the service layer beforehand.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
