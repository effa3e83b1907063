//! Account lifecycle: registration, login, token refresh, logout.

pub mod service;

pub use service::{AuthService, AuthSession, RefreshedAccess};
