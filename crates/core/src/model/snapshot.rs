//! `CrmData`, every collection loaded into memory at once.
//!
//! Lookups are linear scans; at CRM scale that is cheaper than keeping
//! indexes consistent across writes.

use leadflow_shared::types::{CampaignId, FundraiserId, LeadId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entities::{Call, Campaign, Fundraiser, Lead, Payment, User};
use crate::auth::normalize_email;

/// A materialized copy of every collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrmData {
    /// Users.
    pub users: Vec<User>,
    /// Campaigns.
    pub campaigns: Vec<Campaign>,
    /// Leads.
    pub leads: Vec<Lead>,
    /// Fundraisers.
    pub fundraisers: Vec<Fundraiser>,
    /// Payments.
    pub payments: Vec<Payment>,
    /// Calls.
    pub calls: Vec<Call>,
}

/// A fundraiser whose collected total differs from the sum of its payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedDrift {
    /// Fundraiser ID.
    pub fund_id: FundraiserId,
    /// Stored running total.
    pub collected: Decimal,
    /// Sum of the fundraiser's payments.
    pub payments_total: Decimal,
}

impl CrmData {
    /// Finds a user by id.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Finds a user by email, case-insensitively.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let wanted = normalize_email(email);
        self.users
            .iter()
            .find(|u| normalize_email(&u.email) == wanted)
    }

    /// Finds a campaign by id.
    #[must_use]
    pub fn campaign(&self, id: &CampaignId) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| &c.id == id)
    }

    /// Finds a lead by id.
    #[must_use]
    pub fn lead(&self, id: &LeadId) -> Option<&Lead> {
        self.leads.iter().find(|l| &l.id == id)
    }

    /// Finds a fundraiser by id.
    #[must_use]
    pub fn fundraiser(&self, id: &FundraiserId) -> Option<&Fundraiser> {
        self.fundraisers.iter().find(|f| &f.id == id)
    }

    /// Fundraisers created for a lead.
    pub fn fundraisers_for_lead<'a>(
        &'a self,
        lead_id: &'a LeadId,
    ) -> impl Iterator<Item = &'a Fundraiser> + 'a {
        self.fundraisers.iter().filter(move |f| &f.lead_id == lead_id)
    }

    /// Payments credited to a fundraiser.
    pub fn payments_for_fundraiser<'a>(
        &'a self,
        fund_id: &'a FundraiserId,
    ) -> impl Iterator<Item = &'a Payment> + 'a {
        self.payments.iter().filter(move |p| &p.fund_id == fund_id)
    }

    /// Fundraisers whose `collected` no longer equals the sum of their payments.
    ///
    /// Diagnostic only: totals are maintained by increments and never
    /// recomputed.
    #[must_use]
    pub fn collected_drift(&self) -> Vec<CollectedDrift> {
        self.fundraisers
            .iter()
            .filter_map(|f| {
                let payments_total = self
                    .payments_for_fundraiser(&f.id)
                    .fold(Decimal::ZERO, |total, p| total.saturating_add(p.amount));
                (payments_total != f.collected).then(|| CollectedDrift {
                    fund_id: f.id.clone(),
                    collected: f.collected,
                    payments_total,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadflow_shared::types::PaymentId;
    use rust_decimal_macros::dec;

    fn payment(fund: &str, amount: Decimal) -> Payment {
        Payment {
            id: PaymentId::generate(),
            fund_id: FundraiserId::from(fund),
            donor: "Donor".into(),
            amount,
            date: Utc::now(),
            method: "UPI".into(),
            recorded_by: "exec@x.com".into(),
            external_payment_id: None,
        }
    }

    fn fundraiser(id: &str, collected: Decimal) -> Fundraiser {
        Fundraiser {
            id: FundraiserId::from(id),
            lead_id: LeadId::from("lead_1"),
            title: id.into(),
            target: dec!(1000),
            collected,
            owner: "exec@x.com".into(),
            created_at: Utc::now(),
            end_date: None,
            description: None,
            payment_page_id: None,
        }
    }

    #[test]
    fn test_collected_drift_reports_only_mismatches() {
        let data = CrmData {
            fundraisers: vec![fundraiser("fund_a", dec!(400)), fundraiser("fund_b", dec!(100))],
            payments: vec![
                payment("fund_a", dec!(150)),
                payment("fund_a", dec!(250)),
                payment("fund_b", dec!(60)),
            ],
            ..CrmData::default()
        };

        let drift = data.collected_drift();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].fund_id.as_str(), "fund_b");
        assert_eq!(drift[0].payments_total, dec!(60));
    }
}
