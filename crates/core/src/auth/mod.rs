//! Roles, session users and credential checks.
//!
//! Passwords are stored as Argon2id PHC strings; the plaintext secret never
//! leaves the login and user-creation paths.

mod password;

pub use password::{PasswordError, hash_password, normalize_email, verify_password};

use leadflow_shared::types::UserId;
use serde::{Deserialize, Serialize};

use crate::model::User;

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees every record, manages users and campaigns.
    Admin,
    /// Sees only the records they own or acted on.
    Executive,
}

impl Role {
    /// Returns true for the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Executive => "executive",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "executive" => Ok(Self::Executive),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// The logged-in user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Lower-cased email, the ownership key of leads and fundraisers.
    pub email: String,
    /// Role.
    pub role: Role,
}

impl SessionUser {
    /// Returns true if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
