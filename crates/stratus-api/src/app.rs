//! Application wiring: constructs every repository and service from
//! configuration and an open database pool.

use std::sync::Arc;

use sqlx::SqlitePool;

use stratus_auth::jwt::{JwtDecoder, JwtEncoder};
use stratus_auth::{GoogleJwksVerifier, IdTokenVerifier};
use stratus_cache::CacheManager;
use stratus_core::config::AppConfig;
use stratus_core::result::AppResult;
use stratus_database::repositories::{FileRepository, FolderRepository, UserRepository};
use stratus_service::{
    AuthService, FileService, FolderContentMatcher, FolderService, ListingService, SearchService,
};
use stratus_storage::StorageManager;

use crate::state::AppState;

/// Build the application state with the production Google verifier.
pub async fn build_state(config: AppConfig, db_pool: SqlitePool) -> AppResult<AppState> {
    let verifier = Arc::new(GoogleJwksVerifier::new(&config.google));
    build_state_with_verifier(config, db_pool, verifier).await
}

/// Build the application state with an injected ID token verifier.
///
/// Integration tests use this to exercise the Google sign-in flow
/// without network access.
pub async fn build_state_with_verifier(
    config: AppConfig,
    db_pool: SqlitePool,
    verifier: Arc<dyn IdTokenVerifier>,
) -> AppResult<AppState> {
    let cache = Arc::new(CacheManager::new(&config.cache));
    let storage = Arc::new(StorageManager::new(&config.storage).await?);

    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let file_repo = Arc::new(FileRepository::new(db_pool.clone()));
    let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));

    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, Arc::clone(&cache)));

    let matcher = FolderContentMatcher::new(Arc::clone(&file_repo), Arc::clone(&folder_repo));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        verifier,
        &config.auth,
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&storage),
        matcher.clone(),
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
    ));
    let listing_service = Arc::new(ListingService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        matcher.clone(),
    ));
    let search_service = Arc::new(SearchService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        matcher,
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        cache,
        storage,
        jwt_decoder,
        auth_service,
        file_service,
        folder_service,
        listing_service,
        search_service,
    })
}
