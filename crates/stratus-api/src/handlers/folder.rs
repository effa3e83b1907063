//! Folder handlers: create, lookup, delete, subtree size.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use stratus_core::error::AppError;
use stratus_entity::folder::Folder;

use crate::dto::request::CreateFolderRequest;
use crate::dto::response::{ApiResponse, MessageResponse, SizeResponse};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/files/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    req.validate()
        .map_err(|_| AppError::validation("Folder name is required"))?;

    let folder = state
        .folder_service
        .create_folder(auth.user_id, &req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/files/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.get_folder(id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/files/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.folder_service.delete_folder(id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Folder deleted".to_string(),
    })))
}

/// GET /api/files/folders/{id}/size
pub async fn folder_size(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SizeResponse>>, ApiError> {
    let size_bytes = state.folder_service.folder_size(id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(SizeResponse { size_bytes })))
}
