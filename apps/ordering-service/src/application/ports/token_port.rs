//! Token Port (Driven Port)
//!
//! Signs and decodes admin bearer credentials. Signature checks happen in the
//! adapter; role and expiry rules live in the auth gate.

use serde::{Deserialize, Serialize};

/// Claims carried inside an admin credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Admin ID.
    pub sub: String,
    /// Admin email.
    pub email: String,
    /// Role (`admin`).
    pub role: String,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Token signing or decoding error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("Failed to sign token: {message}")]
    Encode { message: String },

    /// Token malformed or signature mismatch.
    #[error("Invalid token: {message}")]
    Invalid { message: String },
}

/// Port for issuing and decoding credentials.
pub trait TokenPort: Send + Sync {
    /// Sign claims into a compact token.
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify the signature and return the claims. Expiry is not checked here.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
