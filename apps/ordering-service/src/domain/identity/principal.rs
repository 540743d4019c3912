//! Authenticated identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AuthError;
use crate::domain::shared::{AdminId, Timestamp};

/// Role carried in a credential claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Restaurant staff with console access.
    Admin,
}

impl Role {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            other => Err(AuthError::unauthenticated(format!(
                "role '{other}' is not permitted"
            ))),
        }
    }
}

/// The verified identity behind an admin request.
///
/// Only produced by the admin auth gate; holding one is proof the bearer
/// credential was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    admin_id: AdminId,
    email: String,
    role: Role,
    expires_at: Timestamp,
}

impl Principal {
    /// Create a principal from verified claims.
    #[must_use]
    pub const fn new(admin_id: AdminId, email: String, role: Role, expires_at: Timestamp) -> Self {
        Self {
            admin_id,
            email,
            role,
            expires_at,
        }
    }

    /// Get the admin ID.
    #[must_use]
    pub const fn admin_id(&self) -> &AdminId {
        &self.admin_id
    }

    /// Get the email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Get the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Get the credential expiry.
    #[must_use]
    pub const fn expires_at(&self) -> Timestamp {
        self.expires_at
    }
}
