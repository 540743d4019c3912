//! In-memory admin account repository.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::identity::{AdminAccount, AdminRepository, AuthError};

/// Admin accounts keyed by normalized email.
#[derive(Debug, Default)]
pub struct InMemoryAdminRepository {
    accounts: RwLock<HashMap<String, AdminAccount>>,
}

impl InMemoryAdminRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Check if there are no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, AuthError> {
        let key = AdminAccount::normalize_email(email);
        Ok(self.accounts.read().get(&key).cloned())
    }

    async fn save(&self, account: &AdminAccount) -> Result<(), AuthError> {
        self.accounts
            .write()
            .insert(account.email().to_string(), account.clone());
        Ok(())
    }
}
