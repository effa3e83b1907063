//! # stratus-auth
//!
//! Authentication building blocks for Stratus: JWT access/refresh token
//! issuance and validation, Argon2id password hashing, and Google ID
//! token verification.

pub mod google;
pub mod jwt;
pub mod password;

pub use google::{GoogleIdentity, GoogleJwksVerifier, IdTokenVerifier};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
