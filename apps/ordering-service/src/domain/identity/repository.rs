//! Admin account store trait.

use async_trait::async_trait;

use super::admin_account::AdminAccount;
use super::errors::AuthError;

/// Persistence for admin accounts, keyed by normalized email.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, AuthError>;

    /// Insert or replace an account.
    async fn save(&self, account: &AdminAccount) -> Result<(), AuthError>;
}
