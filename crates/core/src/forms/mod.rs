//! Form inputs and their validation.
//!
//! Every input validates completely before producing a record, so a
//! rejected form never leads to a partial write.
//!
//! # Modules
//!
//! - `lead` - New lead and activity log forms
//! - `fundraiser` - Fundraiser and payment forms
//! - `admin` - User and campaign forms
//! - `session` - First-run bootstrap and login forms

pub mod admin;
pub mod fundraiser;
pub mod lead;
pub mod session;

pub use admin::{CampaignInput, NewUserInput};
pub use fundraiser::{FundraiserInput, PaymentInput};
pub use lead::{ActivityInput, NewLeadInput, instagram_handle, log_activity};
pub use session::{BootstrapInput, LoginInput};

use leadflow_shared::AppError;
use thiserror::Error;

use crate::auth::PasswordError;

/// Errors raised by form validation.
#[derive(Debug, Error)]
pub enum FormError {
    /// A required field is blank.
    #[error("{0} is required.")]
    Required(&'static str),

    /// A lead has no phone, email or Instagram handle.
    #[error("Provide at least one contact method.")]
    MissingContact,

    /// An amount is zero or negative.
    #[error("{0} must be greater than zero.")]
    NonPositive(&'static str),

    /// Another user has the email.
    #[error("User with this email already exists.")]
    DuplicateEmail,

    /// Another lead has the Instagram handle.
    #[error("A lead with this Instagram handle already exists.")]
    DuplicateInstagram,

    /// A payment with the external payment id was already recorded.
    #[error("Payment {0} has already been recorded.")]
    DuplicatePaymentId(String),

    /// Email and password do not match a user.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl FormError {
    /// Returns true for duplicate-key rejections.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEmail | Self::DuplicateInstagram | Self::DuplicatePaymentId(_)
        )
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        let message = err.to_string();
        match err {
            FormError::DuplicateEmail
            | FormError::DuplicateInstagram
            | FormError::DuplicatePaymentId(_) => Self::Conflict(message),
            FormError::InvalidCredentials => Self::Unauthorized(message),
            FormError::Password(_) => Self::Internal(message),
            FormError::Required(_) | FormError::MissingContact | FormError::NonPositive(_) => {
                Self::Validation(message)
            }
        }
    }
}

/// Trimmed value, `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trimmed value, or `FormError::Required` naming the field.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    non_blank(value).ok_or(FormError::Required(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        let err = AppError::from(FormError::MissingContact);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.alert_message(), "Provide at least one contact method.");

        let err = AppError::from(FormError::DuplicateEmail);
        assert_eq!(err.error_code(), "CONFLICT");
        assert_eq!(err.alert_message(), "User with this email already exists.");

        let err = AppError::from(FormError::InvalidCredentials);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(err.alert_message(), "Invalid email or password.");
    }

    #[test]
    fn test_required() {
        assert_eq!(required("  Asha ", "Name").unwrap(), "Asha");
        assert!(matches!(required("   ", "Name"), Err(FormError::Required("Name"))));
        assert_eq!(non_blank(""), None);
    }
}
