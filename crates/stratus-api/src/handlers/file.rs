//! File handlers: upload, metadata, download, export, delete, recent.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use uuid::Uuid;

use stratus_core::error::AppError;
use stratus_entity::file::File;
use stratus_service::file::{FileExport, UploadFile};

use crate::dto::request::RecentQuery;
use crate::dto::response::{ApiResponse, MessageResponse, RecentItem};
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Default cap for the recent-items feed.
const DEFAULT_RECENT_LIMIT: u64 = 10;

/// POST /api/files/upload
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    let mut upload: Option<UploadFile> = None;
    let mut folder_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::validation("File part must have a filename"))?;
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file part: {e}")))?;

                upload = Some(UploadFile {
                    filename,
                    content_type,
                    folder_id: None,
                    data,
                });
            }
            Some("folder_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid folder_id part: {e}")))?;
                folder_id = super::parse_folder_id(Some(value.as_str()))?;
            }
            _ => {}
        }
    }

    let mut upload = upload.ok_or_else(|| AppError::validation("File part is required"))?;
    upload.folder_id = folder_id;

    let file = state.file_service.upload(auth.user_id, upload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.get_file(id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.file_service.delete_file(id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "File deleted".to_string(),
    })))
}

/// GET /api/files/{id}/export
pub async fn export_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileExport>>, ApiError> {
    let export = state.file_service.export_file(id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(export)))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let download = state.file_service.download_file(id, auth.user_id).await?;
    let file = download.file;

    // The filename is quoted; embedded quotes are stripped rather than
    // escaped.
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.filename.replace('"', "")
    );

    Response::builder()
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Failed to build download response: {e}")).into())
}

/// GET /api/files/recent
pub async fn recent(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<RecentItem>>>, ApiError> {
    let filter = super::parse_filter(query.filter.as_deref())?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);

    let recent = state.file_service.recent(auth.user_id, filter, limit).await?;

    let items = recent
        .folders
        .into_iter()
        .map(|folder| RecentItem::Folder { folder })
        .chain(recent.files.into_iter().map(|file| RecentItem::File { file }))
        .collect();

    Ok(Json(ApiResponse::ok(items)))
}
