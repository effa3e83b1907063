//! # stratus-api
//!
//! HTTP API layer for Stratus. Builds the axum router, maps domain
//! errors to HTTP responses, and defines request/response DTOs. All
//! domain behavior lives in `stratus-service`; handlers stay thin.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
