//! Google ID token verification.

pub mod verifier;

pub use verifier::{GoogleIdentity, GoogleJwksVerifier, IdTokenVerifier};
