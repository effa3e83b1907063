//! Auth handlers: register, login, Google sign-in, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use stratus_core::error::AppError;
use stratus_service::auth::AuthSession;

use crate::dto::request::{GoogleLoginRequest, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, RefreshResponse, SessionResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .auth_service
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(session_response(session))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .auth_service
        .login(&req.identifier, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(session_response(session))))
}

/// POST /api/auth/google
pub async fn login_google(
    State(state): State<AppState>,
    Json(req): Json<GoogleLoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state.auth_service.login_google(&req.id_token).await?;
    Ok(Json(ApiResponse::ok(session_response(session))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let refreshed = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(RefreshResponse {
        access_token: refreshed.access_token,
        expires_at: refreshed.expires_at,
    })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth_service.logout(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

fn session_response(session: AuthSession) -> SessionResponse {
    SessionResponse {
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
        access_expires_at: session.tokens.access_expires_at,
        refresh_expires_at: session.tokens.refresh_expires_at,
        user: session.user.into(),
    }
}
