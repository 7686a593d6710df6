//! User and campaign forms.

use leadflow_shared::types::{CampaignId, UserId};
use serde::Deserialize;

use super::{FormError, required};
use crate::auth::{Role, hash_password, normalize_email};
use crate::model::{Campaign, User};

/// The create-user form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserInput {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email; stored lower-cased.
    #[serde(default)]
    pub email: String,
    /// Plaintext password, hashed before storage.
    #[serde(default)]
    pub password: String,
    /// Role.
    pub role: Role,
}

impl NewUserInput {
    /// Validates the form, hashes the password and builds the user.
    ///
    /// # Errors
    ///
    /// - `Required` for a blank name, email or password
    /// - `DuplicateEmail` when a user with the same email exists, ignoring case
    /// - `Password` if hashing fails
    pub fn into_user(self, existing: &[User]) -> Result<User, FormError> {
        let name = required(&self.name, "Name")?;
        let email = normalize_email(&required(&self.email, "Email")?);
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        if existing.iter().any(|u| normalize_email(&u.email) == email) {
            return Err(FormError::DuplicateEmail);
        }

        Ok(User {
            id: UserId::generate(),
            name,
            email,
            password_hash: hash_password(&self.password)?,
            role: self.role,
        })
    }
}

/// The create-campaign form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignInput {
    /// Organisation name.
    pub organisation: String,
    /// Product or campaign name.
    pub product: String,
}

impl CampaignInput {
    /// Validates the form and builds the campaign.
    ///
    /// # Errors
    ///
    /// `Required` for a blank organisation or product.
    pub fn into_campaign(self) -> Result<Campaign, FormError> {
        Ok(Campaign {
            id: CampaignId::generate(),
            organisation: required(&self.organisation, "Organisation")?,
            product: required(&self.product, "Product")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;

    fn form(email: &str) -> NewUserInput {
        NewUserInput {
            name: "Bala".into(),
            email: email.into(),
            password: "pw-123".into(),
            role: Role::Executive,
        }
    }

    #[test]
    fn test_new_user_is_hashed_and_lowercased() {
        let user = form(" Bala@X.com ").into_user(&[]).unwrap();

        assert_eq!(user.email, "bala@x.com");
        assert_ne!(user.password_hash, "pw-123");
        assert!(verify_password("pw-123", &user.password_hash).unwrap());
    }

    #[test]
    fn test_duplicate_email_ignores_case() {
        let existing = form("bala@x.com").into_user(&[]).unwrap();
        let err = form("BALA@x.com").into_user(&[existing]).unwrap_err();

        assert!(matches!(err, FormError::DuplicateEmail));
        assert_eq!(err.to_string(), "User with this email already exists.");
    }

    #[test]
    fn test_campaign_requires_both_fields() {
        let campaign = CampaignInput {
            organisation: " Helping Hands ".into(),
            product: "School Drive".into(),
        }
        .into_campaign()
        .unwrap();
        assert_eq!(campaign.organisation, "Helping Hands");

        let err = CampaignInput {
            organisation: "Helping Hands".into(),
            product: String::new(),
        }
        .into_campaign()
        .unwrap_err();
        assert!(matches!(err, FormError::Required("Product")));
    }
}
