//! Verification of Google-issued ID tokens against the Google JWKS.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::debug;

use stratus_core::config::GoogleAuthConfig;
use stratus_core::error::AppError;
use stratus_core::result::AppResult;

/// Issuer values Google uses in ID tokens.
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// The verified identity carried by a Google ID token.
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    /// Google's stable subject identifier for the account.
    pub subject: String,
    /// The account's email address, when present in the token.
    pub email: Option<String>,
}

/// Verifies externally-issued ID tokens.
///
/// A trait seam so the auth flow can be tested without network access;
/// the production implementation is [`GoogleJwksVerifier`].
#[async_trait]
pub trait IdTokenVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verify an ID token and return the identity it asserts.
    async fn verify(&self, id_token: &str) -> AppResult<GoogleIdentity>;
}

/// Claims subset extracted from a Google ID token.
#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: Option<String>,
}

/// A single key from Google's JWKS document.
#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// Google's JWKS document.
#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Production verifier: checks the RS256 signature against Google's
/// published JWKS and validates audience and issuer.
#[derive(Debug, Clone)]
pub struct GoogleJwksVerifier {
    http: reqwest::Client,
    client_id: String,
    jwks_url: String,
}

impl GoogleJwksVerifier {
    /// Create a verifier from Google auth configuration.
    pub fn new(config: &GoogleAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            jwks_url: config.jwks_url.clone(),
        }
    }

    /// Fetch the current JWKS and find the key matching `kid`.
    async fn fetch_key(&self, kid: &str) -> AppResult<DecodingKey> {
        let jwks: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    stratus_core::error::ErrorKind::ExternalService,
                    "Failed to fetch Google JWKS",
                    e,
                )
            })?
            .json()
            .await
            .map_err(|e| {
                AppError::with_source(
                    stratus_core::error::ErrorKind::ExternalService,
                    "Failed to parse Google JWKS",
                    e,
                )
            })?;

        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.kid == kid)
            .ok_or_else(|| AppError::authentication("Invalid Google token"))?;

        DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| AppError::with_source(
                stratus_core::error::ErrorKind::ExternalService,
                "Invalid key in Google JWKS",
                e,
            ))
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleJwksVerifier {
    async fn verify(&self, id_token: &str) -> AppResult<GoogleIdentity> {
        if self.client_id.is_empty() {
            return Err(AppError::authentication("Google sign-in is not configured"));
        }

        let header = decode_header(id_token)
            .map_err(|_| AppError::authentication("Invalid Google token"))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::authentication("Invalid Google token"))?;

        let key = self.fetch_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let token_data = decode::<GoogleClaims>(id_token, &key, &validation)
            .map_err(|_| AppError::authentication("Invalid Google token"))?;

        debug!(subject = %token_data.claims.sub, "Verified Google ID token");

        Ok(GoogleIdentity {
            subject: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}
