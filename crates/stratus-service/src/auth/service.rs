//! Account registration, login, Google sign-in, and token lifecycle.
//!
//! Password login failures are deliberately indistinguishable: an unknown
//! identifier and a wrong password both answer "Invalid credentials".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use stratus_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use stratus_auth::password::PasswordHasher;
use stratus_auth::{GoogleIdentity, IdTokenVerifier};
use stratus_core::config::AuthConfig;
use stratus_core::error::AppError;
use stratus_core::result::AppResult;
use stratus_database::repositories::UserRepository;
use stratus_entity::user::{CreateUser, User};

/// A logged-in session: the account plus a fresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated account.
    pub user: User,
    /// Freshly issued access and refresh tokens.
    pub tokens: TokenPair,
}

/// A newly issued access token from a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedAccess {
    /// The new access token.
    pub access_token: String,
    /// When it expires.
    pub expires_at: DateTime<Utc>,
}

/// Handles account creation and credential verification.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    verifier: Arc<dyn IdTokenVerifier>,
    password_min_length: usize,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        verifier: Arc<dyn IdTokenVerifier>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher: PasswordHasher::new(),
            encoder,
            decoder,
            verifier,
            password_min_length: config.password_min_length,
        }
    }

    /// Register a password account and log it in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthSession> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        if self
            .user_repo
            .find_by_username_or_email(username, email)
            .await?
            .is_some()
        {
            return Err(AppError::validation("Username or email already exists"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: Some(username.to_string()),
                email: Some(email.to_string()),
                password_hash: Some(password_hash),
                google_id: None,
            })
            .await?;

        info!(user_id = %user.id, "Account registered");
        self.open_session(user)
    }

    /// Log in with a username or email plus password.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .user_repo
            .find_by_identifier(identifier.trim())
            .await?
            .ok_or_else(|| AppError::validation("Invalid credentials"))?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::validation("Account uses Google login"));
        };

        if !self.hasher.verify_password(password, hash)? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::validation("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");
        self.open_session(user)
    }

    /// Log in with a Google ID token, creating the account on first use.
    pub async fn login_google(&self, id_token: &str) -> AppResult<AuthSession> {
        let identity = self.verifier.verify(id_token).await?;

        let user = match self.user_repo.find_by_google_id(&identity.subject).await? {
            Some(user) => user,
            None => self.create_google_account(&identity).await?,
        };

        info!(user_id = %user.id, "User logged in via Google");
        self.open_session(user)
    }

    /// Exchange a valid refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshedAccess> {
        let claims = self.decoder.decode_refresh_token(refresh_token).await?;
        let (access_token, expires_at) = self.encoder.generate_access_token(claims.user_id())?;
        Ok(RefreshedAccess {
            access_token,
            expires_at,
        })
    }

    /// Revoke a refresh token. Unparseable or already-revoked tokens are
    /// ignored so the endpoint is idempotent.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        match self.decoder.decode_refresh_token(refresh_token).await {
            Ok(claims) => self.decoder.revoke_refresh_token(&claims).await,
            Err(_) => Ok(()),
        }
    }

    fn open_session(&self, user: User) -> AppResult<AuthSession> {
        let tokens = self.encoder.generate_token_pair(user.id)?;
        Ok(AuthSession { user, tokens })
    }

    /// First Google sign-in: derive a username from the email local part,
    /// falling back to a random suffix when that name is taken.
    async fn create_google_account(&self, identity: &GoogleIdentity) -> AppResult<User> {
        let base = identity
            .email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|part| !part.is_empty())
            .map(str::to_string);

        let data = CreateUser {
            username: base.clone(),
            email: identity.email.clone(),
            password_hash: None,
            google_id: Some(identity.subject.clone()),
        };

        match self.user_repo.create(&data).await {
            Ok(user) => Ok(user),
            Err(_) if base.is_some() => {
                let suffix = Uuid::new_v4().simple().to_string();
                let retry = CreateUser {
                    username: base.map(|name| format!("{name}-{}", &suffix[..8])),
                    ..data
                };
                self.user_repo.create(&retry).await
            }
            Err(e) => Err(e),
        }
    }
}
