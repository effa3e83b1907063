//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

/// Google sign-in configuration.
///
/// When `client_id` is empty the `/api/auth/google` endpoint rejects
/// all tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthConfig {
    /// OAuth client ID expected in the `aud` claim of Google ID tokens.
    #[serde(default)]
    pub client_id: String,
    /// JWKS endpoint for Google's token-signing keys.
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,
}

impl Default for GoogleAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            jwks_url: default_jwks_url(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    8
}

fn default_jwks_url() -> String {
    "https://www.googleapis.com/oauth2/v3/certs".to_string()
}
