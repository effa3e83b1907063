//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body. `identifier` matches username or email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Google sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    /// Google-issued ID token.
    pub id_token: String,
}

/// Token refresh / logout request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID (`None` for root level).
    pub parent_id: Option<uuid::Uuid>,
}

/// Query parameters for `GET /api/files`.
///
/// `folder_id` is a string so the literal `"null"` can select the root
/// level, matching what browser clients send.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Folder to list; absent or `"null"` means root.
    pub folder_id: Option<String>,
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
    /// Category filter.
    pub filter: Option<String>,
}

/// Query parameters for `GET /api/files/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Substring to match against names.
    #[serde(default)]
    pub query: String,
    /// Category filter.
    pub filter: Option<String>,
}

/// Query parameters for `GET /api/files/recent`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentQuery {
    /// Cap on each of the folder and file lists.
    pub limit: Option<u64>,
    /// Category filter.
    pub filter: Option<String>,
}
