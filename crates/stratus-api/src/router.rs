//! Route definitions for the Stratus HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use stratus_core::config::CorsConfig;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(folder_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, Google sign-in, refresh, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/google", post(handlers::auth::login_google))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// File listing, search, transfer, and metadata
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::listing::list_files))
        .route("/files/search", get(handlers::search::search_files))
        .route("/files/recent", get(handlers::file::recent))
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/export", get(handlers::file::export_file))
        .route("/files/{id}/download", get(handlers::file::download_file))
}

/// Folder CRUD and subtree size
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/files/folders", post(handlers::folder::create_folder))
        .route("/files/folders/{id}", get(handlers::folder::get_folder))
        .route(
            "/files/folders/{id}",
            delete(handlers::folder::delete_folder),
        )
        .route(
            "/files/folders/{id}/size",
            get(handlers::folder::folder_size),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    use axum::http::{HeaderName, HeaderValue, Method};
    use tower_http::cors::{AllowHeaders, Any};

    let wildcard_origin = config.allowed_origins.contains(&"*".to_string());
    let wildcard_headers = config.allowed_headers.contains(&"*".to_string());

    let mut cors = CorsLayer::new();

    if wildcard_origin {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        // Credentials require an explicit origin list; the wildcard
        // origin forbids them.
        cors = cors.allow_origin(origins).allow_credentials(true);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors = match (wildcard_headers, wildcard_origin) {
        (true, true) => cors.allow_headers(Any),
        // `Any` cannot be combined with credentials.
        (true, false) => cors.allow_headers(AllowHeaders::mirror_request()),
        (false, _) => {
            let headers: Vec<HeaderName> = config
                .allowed_headers
                .iter()
                .filter_map(|h| h.parse().ok())
                .collect();
            cors.allow_headers(headers)
        }
    };

    cors.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
