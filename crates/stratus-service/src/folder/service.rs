//! Folder lifecycle operations.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::info;
use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_database::repositories::{FileRepository, FolderRepository};
use stratus_entity::folder::{CreateFolder, Folder};

use super::MAX_TRAVERSAL_DEPTH;

/// Handles folder creation, lookup, deletion, and subtree sizing.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
}

impl FolderService {
    /// Create a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            folder_repo,
            file_repo,
        }
    }

    /// Create a folder under an (optional) existing parent.
    pub async fn create_folder(
        &self,
        owner_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }

        if let Some(parent) = parent_id {
            self.folder_repo
                .find_by_id(parent, owner_id)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: name.to_string(),
                owner_id,
                parent_id,
            })
            .await?;

        info!(user_id = %owner_id, folder_id = %folder.id, "Folder created");
        Ok(folder)
    }

    /// Look up a folder visible to its owner.
    pub async fn get_folder(&self, id: Uuid, owner_id: Uuid) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Delete a folder. Fails if the folder still has child files or
    /// folders; the tree is left unchanged on failure.
    pub async fn delete_folder(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        self.get_folder(id, owner_id).await?;

        let child_folders = self.folder_repo.count_children(id, owner_id).await?;
        let child_files = self.file_repo.count_in_folder(id, owner_id).await?;
        if child_folders > 0 || child_files > 0 {
            return Err(AppError::validation("Folder is not empty"));
        }

        self.folder_repo.delete(id, owner_id).await?;
        info!(user_id = %owner_id, folder_id = %id, "Folder deleted");
        Ok(())
    }

    /// Total byte size of all files in the folder's subtree.
    ///
    /// A failure for any subfolder fails the whole computation; a partial
    /// sum is never reported.
    pub async fn folder_size(&self, id: Uuid, owner_id: Uuid) -> AppResult<i64> {
        self.get_folder(id, owner_id).await?;
        self.size_at_depth(id, owner_id, 0).await
    }

    fn size_at_depth(
        &self,
        folder_id: Uuid,
        owner_id: Uuid,
        depth: usize,
    ) -> BoxFuture<'_, AppResult<i64>> {
        Box::pin(async move {
            if depth > MAX_TRAVERSAL_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum traversal depth",
                ));
            }

            let mut total = self.file_repo.sum_size_in_folder(folder_id, owner_id).await?;
            let children = self.folder_repo.find_by_parent(owner_id, Some(folder_id)).await?;
            for child in children {
                total += self.size_at_depth(child.id, owner_id, depth + 1).await?;
            }
            Ok(total)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;
    use stratus_core::error::ErrorKind;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory database");
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("run migrations");
        pool
    }

    async fn seed_user(pool: &SqlitePool) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, username, email, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(format!("user-{id}"))
            .bind(format!("{id}@example.com"))
            .bind(Utc::now())
            .execute(pool)
            .await
            .expect("insert user");
        id
    }

    async fn seed_file(pool: &SqlitePool, owner: Uuid, folder: Option<Uuid>, size: i64) {
        sqlx::query(
            "INSERT INTO files \
             (id, filename, size_bytes, storage_key, content_type, owner_id, folder_id, uploaded_at) \
             VALUES (?, 'f', ?, 'k', 'text/plain', ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(size)
        .bind(owner)
        .bind(folder)
        .bind(Utc::now())
        .execute(pool)
        .await
        .expect("insert file");
    }

    fn make_service(pool: &SqlitePool) -> FolderService {
        FolderService::new(
            Arc::new(FolderRepository::new(pool.clone())),
            Arc::new(FileRepository::new(pool.clone())),
        )
    }

    #[tokio::test]
    async fn rejects_blank_folder_names() {
        let pool = test_pool().await;
        let owner = seed_user(&pool).await;
        let service = make_service(&pool);

        let err = service.create_folder(owner, "   ", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn rejects_missing_or_foreign_parents() {
        let pool = test_pool().await;
        let owner = seed_user(&pool).await;
        let stranger = seed_user(&pool).await;
        let service = make_service(&pool);

        let err = service
            .create_folder(owner, "docs", Some(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let theirs = service.create_folder(stranger, "theirs", None).await.unwrap();
        let err = service
            .create_folder(owner, "docs", Some(theirs.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_requires_empty_folder() {
        let pool = test_pool().await;
        let owner = seed_user(&pool).await;
        let service = make_service(&pool);

        let parent = service.create_folder(owner, "parent", None).await.unwrap();
        let child = service
            .create_folder(owner, "child", Some(parent.id))
            .await
            .unwrap();

        let err = service.delete_folder(parent.id, owner).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Folder is not empty");
        // Tree unchanged
        assert!(service.get_folder(parent.id, owner).await.is_ok());

        seed_file(&pool, owner, Some(child.id), 1).await;
        let err = service.delete_folder(child.id, owner).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        sqlx::query("DELETE FROM files").execute(&pool).await.unwrap();
        service.delete_folder(child.id, owner).await.unwrap();
        service.delete_folder(parent.id, owner).await.unwrap();
    }

    #[tokio::test]
    async fn folder_size_sums_the_whole_subtree() {
        let pool = test_pool().await;
        let owner = seed_user(&pool).await;
        let service = make_service(&pool);

        let top = service.create_folder(owner, "top", None).await.unwrap();
        let nested = service
            .create_folder(owner, "nested", Some(top.id))
            .await
            .unwrap();

        seed_file(&pool, owner, Some(top.id), 100).await;
        seed_file(&pool, owner, Some(nested.id), 250).await;
        seed_file(&pool, owner, None, 999).await; // root file, not in subtree

        assert_eq!(service.folder_size(top.id, owner).await.unwrap(), 350);
        assert_eq!(service.folder_size(nested.id, owner).await.unwrap(), 250);
    }
}
