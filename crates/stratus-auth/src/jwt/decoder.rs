//! JWT token validation and refresh-token revocation.
//!
//! Revoked refresh tokens are tracked in the shared cache keyed by their
//! `jti`, with a TTL equal to the token's remaining lifetime. Access
//! tokens are short-lived and validated by signature and expiry alone.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use stratus_cache::CacheManager;
use stratus_cache::keys;
use stratus_core::config::AuthConfig;
use stratus_core::error::AppError;
use stratus_core::traits::CacheProvider;

use super::claims::{Claims, TokenType};

/// Validates Stratus tokens and manages refresh-token revocation.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Cache holding revoked refresh-token IDs.
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            cache,
        }
    }

    /// Decode and validate an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Invalid token type: expected access token",
            ));
        }
        Ok(claims)
    }

    /// Decode and validate a refresh token, rejecting revoked ones.
    pub async fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(
                "Invalid token type: expected refresh token",
            ));
        }

        let revoked = self
            .cache
            .exists(&keys::revoked_refresh_token(claims.jti))
            .await?;
        if revoked {
            return Err(AppError::authentication("Refresh token revoked"));
        }

        Ok(claims)
    }

    /// Mark a refresh token as revoked for its remaining lifetime.
    pub async fn revoke_refresh_token(&self, claims: &Claims) -> Result<(), AppError> {
        let remaining = claims.remaining_ttl_seconds();
        // A minimum TTL covers clock-skew leeway on already-expired tokens.
        let ttl = Duration::from_secs(remaining.max(60));
        self.cache
            .set(&keys::revoked_refresh_token(claims.jti), "revoked", ttl)
            .await?;
        debug!(jti = %claims.jti, ttl_seconds = ttl.as_secs(), "Refresh token revoked");
        Ok(())
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;
        Ok(token_data.claims)
    }
}
