//! Admin Auth Gate
//!
//! Issues signed bearer credentials on login and turns presented credentials
//! back into a [`Principal`]. Every admin operation takes a `&Principal`, so
//! nothing reaches the order mutation path without passing through here.

use std::sync::Arc;

use chrono::Duration;

use crate::application::dto::LoginResponseDto;
use crate::application::ports::{PasswordHasherPort, TokenClaims, TokenPort};
use crate::domain::identity::{AdminAccount, AdminRepository, AuthError, Principal, Role};
use crate::domain::shared::{AdminId, Timestamp};

/// Credential gate for the admin console.
pub struct AdminAuthGate<A, T, H>
where
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    admins: Arc<A>,
    tokens: Arc<T>,
    hasher: Arc<H>,
    token_ttl: Duration,
}

impl<A, T, H> AdminAuthGate<A, T, H>
where
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    /// Create a new gate. Tokens live for `token_ttl` after issue.
    pub const fn new(admins: Arc<A>, tokens: Arc<T>, hasher: Arc<H>, token_ttl: Duration) -> Self {
        Self {
            admins,
            tokens,
            hasher,
            token_ttl,
        }
    }

    /// Create or replace an admin account with a fresh password hash.
    pub async fn register_admin(
        &self,
        id: AdminId,
        email: &str,
        password: &str,
    ) -> Result<AdminAccount, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Internal {
                message: "admin email and password must not be empty".to_string(),
            });
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal {
                message: e.to_string(),
            })?
            .map_err(|e| AuthError::Internal {
                message: e.to_string(),
            })?;
        let account = AdminAccount::new(id, email, hash);
        self.admins.save(&account).await?;

        tracing::info!(admin_id = %account.id(), email = %account.email(), "Admin account registered");
        Ok(account)
    }

    /// Exchange email and password for a signed token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponseDto, AuthError> {
        self.login_at(email, password, Timestamp::now()).await
    }

    /// [`Self::login`] with an explicit clock.
    pub async fn login_at(
        &self,
        email: &str,
        password: &str,
        now: Timestamp,
    ) -> Result<LoginResponseDto, AuthError> {
        let Some(account) = self.admins.find_by_email(email).await? else {
            tracing::warn!(email = %email, "Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let stored_hash = account.password_hash().to_string();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Internal {
                message: e.to_string(),
            })?;
        if !matches {
            tracing::warn!(email = %account.email(), "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let expires_at = now.plus(self.token_ttl);
        let claims = TokenClaims {
            sub: account.id().to_string(),
            email: account.email().to_string(),
            role: Role::Admin.to_string(),
            iat: now.unix_seconds(),
            exp: expires_at.unix_seconds(),
        };
        let token = self
            .tokens
            .issue(&claims)
            .map_err(|e| AuthError::Internal {
                message: e.to_string(),
            })?;

        tracing::info!(admin_id = %account.id(), "Admin logged in");

        Ok(LoginResponseDto {
            token,
            email: account.email().to_string(),
            expires_at,
        })
    }

    /// Verify a bearer credential.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, Timestamp::now())
    }

    /// [`Self::verify`] with an explicit clock.
    ///
    /// Succeeds only for a correctly signed token whose role is `admin` and
    /// whose expiry is strictly after `now`.
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Principal, AuthError> {
        let claims = self
            .tokens
            .decode(token)
            .map_err(|e| AuthError::unauthenticated(e.to_string()))?;

        let role: Role = claims.role.parse()?;

        if claims.exp <= now.unix_seconds() {
            return Err(AuthError::unauthenticated("token expired"));
        }

        Ok(Principal::new(
            AdminId::new(claims.sub),
            claims.email,
            role,
            Timestamp::from_unix_seconds(claims.exp),
        ))
    }
}
