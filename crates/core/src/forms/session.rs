//! First-run bootstrap and login forms.

use serde::Deserialize;

use super::admin::NewUserInput;
use super::{FormError, required};
use crate::auth::{Role, normalize_email, verify_password};
use crate::model::User;

/// The first-run form creating the initial admin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootstrapInput {
    /// Admin display name.
    pub name: String,
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

impl BootstrapInput {
    /// Builds the admin user.
    ///
    /// # Errors
    ///
    /// `Required` for a blank field, `Password` if hashing fails.
    pub fn into_admin(self) -> Result<User, FormError> {
        NewUserInput {
            name: self.name,
            email: self.email,
            password: self.password,
            role: Role::Admin,
        }
        .into_user(&[])
    }
}

/// The login form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginInput {
    /// Email, any case.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginInput {
    /// Finds the user the credentials belong to.
    ///
    /// Unknown emails, wrong passwords and unreadable stored hashes all give
    /// the same error.
    ///
    /// # Errors
    ///
    /// `Required` for a blank email or password, `InvalidCredentials` otherwise.
    pub fn authenticate<'u>(&self, users: &'u [User]) -> Result<&'u User, FormError> {
        let email = normalize_email(&required(&self.email, "Email")?);
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }

        users
            .iter()
            .find(|u| normalize_email(&u.email) == email)
            .filter(|u| verify_password(&self.password, &u.password_hash).unwrap_or(false))
            .ok_or(FormError::InvalidCredentials)
    }
}
