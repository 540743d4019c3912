//! bcrypt password hashing.

use crate::application::ports::{PasswordHashError, PasswordHasherPort};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashes admin passwords with bcrypt. Salt and cost live in the hash string.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor (4..=31).
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Get the work factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasherPort for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordHashError::Hash {
            message: e.to_string(),
        })
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match bcrypt::verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash is unreadable: {}", e);
                false
            }
        }
    }
}
