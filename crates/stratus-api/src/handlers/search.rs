//! Recursive search handler.

use axum::Json;
use axum::extract::{Query, State};

use stratus_service::SearchHit;

use crate::dto::request::SearchQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/files/search
pub async fn search_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchHit>>>, ApiError> {
    let filter = super::parse_filter(query.filter.as_deref())?;
    let hits = state
        .search_service
        .search(auth.user_id, &query.query, filter)
        .await?;
    Ok(Json(ApiResponse::ok(hits)))
}
