//! Admin authentication errors.

use std::fmt;

/// Errors raised by login and credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email unknown or password mismatch. Deliberately does not say which.
    InvalidCredentials,

    /// Bearer credential missing, malformed, expired or not an admin.
    Unauthenticated {
        /// Why the credential was rejected (logged, never returned).
        reason: String,
    },

    /// Credential store or token signer failed.
    Internal {
        /// Error message.
        message: String,
    },
}

impl AuthError {
    /// Shorthand for a rejected credential.
    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::Unauthenticated { reason } => write!(f, "Unauthenticated: {reason}"),
            Self::Internal { message } => write!(f, "Authentication failure: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}
