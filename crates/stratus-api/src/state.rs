//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use stratus_auth::jwt::JwtDecoder;
use stratus_cache::CacheManager;
use stratus_core::config::AppConfig;
use stratus_service::{AuthService, FileService, FolderService, ListingService, SearchService};
use stratus_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// SQLite connection pool.
    pub db_pool: SqlitePool,
    /// Cache manager (revocation store).
    pub cache: Arc<CacheManager>,
    /// Storage provider manager.
    pub storage: Arc<StorageManager>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Account lifecycle service.
    pub auth_service: Arc<AuthService>,
    /// File transfer service.
    pub file_service: Arc<FileService>,
    /// Folder tree service.
    pub folder_service: Arc<FolderService>,
    /// Folder listing service.
    pub listing_service: Arc<ListingService>,
    /// Recursive search service.
    pub search_service: Arc<SearchService>,
}
