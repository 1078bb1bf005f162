//! Data structures for authentication-related entities.
//!
//! This module defines the user roles, account statuses, the decoded Identity,
//! and the login request/response payloads exchanged with the API.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User roles recognized by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Adopter,
    Shelter,
    Admin,
}

impl Role {
    /// Parse a role claim, tolerating case differences. Unknown values map to
    /// `None` so a bad claim degrades to "no role-gated access" instead of a
    /// decode failure.
    pub fn parse(value: &str) -> Option<Role> {
        match value.to_ascii_uppercase().as_str() {
            "ADOPTER" => Some(Role::Adopter),
            "SHELTER" => Some(Role::Shelter),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Adopter => "ADOPTER",
            Role::Shelter => "SHELTER",
            Role::Admin => "ADMIN",
        }
    }
}

/// Account standing carried in the token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Banned,
}

impl AccountStatus {
    /// Parse a status claim; absent or unrecognized statuses default to
    /// Active because the server re-checks standing on every call anyway.
    pub fn parse(value: Option<&str>) -> AccountStatus {
        match value.map(str::to_ascii_uppercase).as_deref() {
            Some("INACTIVE") => AccountStatus::Inactive,
            Some("BANNED") => AccountStatus::Banned,
            _ => AccountStatus::Active,
        }
    }
}

/// The decoded representation of the authenticated user's claims.
///
/// Never mutated in place: session transitions replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub status: AccountStatus,
    /// Expiry as epoch seconds; absent means the client imposes no deadline
    /// and the server remains the authority on every call.
    pub expires_at: Option<i64>,
}

impl Identity {
    /// Check if the identity's token has expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => Utc::now().timestamp() > exp,
            None => false,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}

/// Login request payload
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Tokens extracted from a successful login response, after the
/// normalization boundary has flattened whichever shape the server used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}
