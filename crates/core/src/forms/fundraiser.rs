//! Fundraiser and payment forms.

use chrono::{DateTime, NaiveDate, Utc};
use leadflow_shared::types::{FundraiserId, PaymentId};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{FormError, non_blank, required};
use crate::model::{Fundraiser, Lead, Payment};

/// The fundraiser create/edit form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserInput {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Target amount.
    pub target: Decimal,
    /// Optional end date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// Optional external payment page id.
    #[serde(default)]
    pub payment_page_id: String,
}

impl FundraiserInput {
    fn validate(&self) -> Result<String, FormError> {
        let title = required(&self.title, "Title")?;
        if self.target <= Decimal::ZERO {
            return Err(FormError::NonPositive("Target amount"));
        }
        Ok(title)
    }

    /// Builds a new fundraiser for a lead, owned by the lead's owner, with
    /// nothing collected.
    ///
    /// # Errors
    ///
    /// `Required` for a blank title, `NonPositive` for a target of zero or less.
    pub fn into_fundraiser(self, lead: &Lead, now: DateTime<Utc>) -> Result<Fundraiser, FormError> {
        let title = self.validate()?;
        Ok(Fundraiser {
            id: FundraiserId::generate(),
            lead_id: lead.id.clone(),
            title,
            target: self.target,
            collected: Decimal::ZERO,
            owner: lead.owner.clone(),
            created_at: now,
            end_date: self.end_date,
            description: non_blank(&self.description),
            payment_page_id: non_blank(&self.payment_page_id),
        })
    }

    /// Applies the form to an existing fundraiser. `collected`, owner, lead
    /// and creation time are left as they are.
    ///
    /// # Errors
    ///
    /// Same as [`FundraiserInput::into_fundraiser`].
    pub fn apply_to(self, fundraiser: &mut Fundraiser) -> Result<(), FormError> {
        fundraiser.title = self.validate()?;
        fundraiser.target = self.target;
        fundraiser.end_date = self.end_date;
        fundraiser.description = non_blank(&self.description);
        fundraiser.payment_page_id = non_blank(&self.payment_page_id);
        Ok(())
    }
}

/// The payment confirmation form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Donor name.
    #[serde(default)]
    pub donor: String,
    /// Amount.
    pub amount: Decimal,
    /// Payment date; the confirmation time when absent.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Payment method.
    #[serde(default)]
    pub method: String,
    /// Optional payment processor id.
    #[serde(default)]
    pub external_payment_id: String,
}

impl PaymentInput {
    /// Validates the form and builds the payment.
    ///
    /// # Errors
    ///
    /// - `Required` for a blank donor or method
    /// - `NonPositive` for an amount of zero or less
    /// - `DuplicatePaymentId` when `existing` already holds the external id
    pub fn into_payment(
        self,
        fund_id: &FundraiserId,
        recorded_by: &str,
        now: DateTime<Utc>,
        existing: &[Payment],
    ) -> Result<Payment, FormError> {
        let donor = required(&self.donor, "Donor")?;
        let method = required(&self.method, "Payment method")?;
        if self.amount <= Decimal::ZERO {
            return Err(FormError::NonPositive("Amount"));
        }

        let external_payment_id = non_blank(&self.external_payment_id);
        if let Some(external) = &external_payment_id {
            if existing
                .iter()
                .any(|p| p.external_payment_id.as_ref() == Some(external))
            {
                return Err(FormError::DuplicatePaymentId(external.clone()));
            }
        }

        Ok(Payment {
            id: PaymentId::generate(),
            fund_id: fund_id.clone(),
            donor,
            amount: self.amount,
            date: self.date.unwrap_or(now),
            method,
            recorded_by: recorded_by.to_string(),
            external_payment_id,
        })
    }
}
