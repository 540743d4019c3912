//! Password Hasher Port (Driven Port)
//!
//! Adapters are expected to be slow on purpose; the auth gate runs them on
//! the blocking pool.

/// Password hashing failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hash could not be produced.
    #[error("Failed to hash password: {message}")]
    Hash { message: String },
}

/// Port for one-way password hashing. The salt travels inside the hash.
pub trait PasswordHasherPort: Send + Sync + 'static {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a stored hash. Malformed hashes never match.
    fn verify(&self, password: &str, stored_hash: &str) -> bool;
}
