//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered Stratus account.
///
/// An account is created either through registration (password set, no
/// Google id) or through the first Google sign-in (Google id set, no
/// password). At least one of the two credentials is always present.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique username (absent only for malformed external identities).
    pub username: Option<String>,
    /// Unique email address.
    pub email: Option<String>,
    /// Argon2 password hash. `None` for Google-only accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Google subject identifier. `None` for password accounts.
    #[serde(skip_serializing)]
    pub google_id: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account can log in with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Username.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
    /// Google subject identifier.
    pub google_id: Option<String>,
}
