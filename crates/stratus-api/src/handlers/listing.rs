//! Folder content listing handler.

use axum::Json;
use axum::extract::{Query, State};

use stratus_core::error::AppError;
use stratus_core::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
use stratus_service::Listing;

use crate::dto::request::ListQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Listing>>, ApiError> {
    let folder_id = super::parse_folder_id(query.folder_id.as_deref())?;
    let filter = super::parse_filter(query.filter.as_deref())?;

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if limit > MAX_PAGE_SIZE {
        return Err(AppError::validation(format!(
            "limit must not exceed {MAX_PAGE_SIZE}"
        ))
        .into());
    }
    let page = PageRequest::try_new(query.page.unwrap_or(1), limit)?;

    let listing = state
        .listing_service
        .list(auth.user_id, folder_id, &page, filter)
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}
