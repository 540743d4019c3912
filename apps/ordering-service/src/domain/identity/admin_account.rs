//! Admin console account.

use crate::domain::shared::{AdminId, Timestamp};

/// A staff account able to log in to the admin console.
///
/// Only a one-way hash of the password is kept; its salt is embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    id: AdminId,
    email: String,
    password_hash: String,
    created_at: Timestamp,
}

impl AdminAccount {
    /// Create an account. The email is normalized to lowercase.
    #[must_use]
    pub fn new(id: AdminId, email: &str, password_hash: String) -> Self {
        Self {
            id,
            email: Self::normalize_email(email),
            password_hash,
            created_at: Timestamp::now(),
        }
    }

    /// Canonical form used for lookups.
    #[must_use]
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Get the admin ID.
    #[must_use]
    pub const fn id(&self) -> &AdminId {
        &self.id
    }

    /// Get the normalized email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Get the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let account = AdminAccount::new(
            AdminId::new("admin-1"),
            "  Admin@RedDragon.com ",
            "hash".to_string(),
        );
        assert_eq!(account.email(), "admin@reddragon.com");
    }
}
