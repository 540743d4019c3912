//! Admin auth DTOs

use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequestDto {
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Plain-text password.
    #[serde(default)]
    pub password: String,
}

/// Issued bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    /// Signed token for the `Authorization: Bearer` header.
    pub token: String,
    /// Account email.
    pub email: String,
    /// When the token stops being accepted.
    pub expires_at: Timestamp,
}

/// Result of `/admin/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponseDto {
    /// Whether the presented token is valid.
    pub valid: bool,
    /// Account email when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
