//! Cache key builders for all Stratus cache entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the application uses.

use uuid::Uuid;

/// Prefix applied to all Stratus cache keys.
const PREFIX: &str = "stratus";

/// Key marking a refresh token (by its `jti` claim) as revoked.
pub fn revoked_refresh_token(token_id: Uuid) -> String {
    format!("{PREFIX}:auth:revoked:{token_id}")
}
