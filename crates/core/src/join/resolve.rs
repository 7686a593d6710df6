//! Join functions.

use leadflow_shared::types::{CampaignId, LeadId};

use super::rows::{CallRow, FundraiserRow, LeadRow, PaymentRow, UserRow};
use crate::model::{Call, Campaign, Fundraiser, Lead, Payment, User};

/// Shown in place of a related record that no longer exists.
pub const NOT_AVAILABLE: &str = "N/A";

/// Product name of a campaign, or [`NOT_AVAILABLE`].
#[must_use]
pub fn campaign_product(campaigns: &[Campaign], id: &CampaignId) -> String {
    campaigns
        .iter()
        .find(|c| &c.id == id)
        .map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.product.clone())
}

/// `"organisation / product"`, or [`NOT_AVAILABLE`].
#[must_use]
pub fn campaign_label(campaign: Option<&Campaign>) -> String {
    campaign.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |c| format!("{} / {}", c.organisation, c.product),
    )
}

/// Name of a lead, or [`NOT_AVAILABLE`].
#[must_use]
pub fn lead_name(leads: &[Lead], id: &LeadId) -> String {
    leads
        .iter()
        .find(|l| &l.id == id)
        .map_or_else(|| NOT_AVAILABLE.to_string(), |l| l.name.clone())
}

/// Leads joined with campaign product names.
pub fn lead_rows<'a>(leads: impl IntoIterator<Item = &'a Lead>, campaigns: &[Campaign]) -> Vec<LeadRow> {
    leads
        .into_iter()
        .map(|lead| LeadRow {
            campaign_name: campaign_product(campaigns, &lead.campaign_id),
            lead: lead.clone(),
        })
        .collect()
}

/// Fundraisers joined with lead names and progress.
pub fn fundraiser_rows<'a>(
    fundraisers: impl IntoIterator<Item = &'a Fundraiser>,
    leads: &[Lead],
) -> Vec<FundraiserRow> {
    fundraisers
        .into_iter()
        .map(|fundraiser| FundraiserRow {
            lead_name: lead_name(leads, &fundraiser.lead_id),
            progress: fundraiser.progress_percent(),
            fundraiser: fundraiser.clone(),
        })
        .collect()
}

/// Payments joined with fundraiser titles.
pub fn payment_rows<'a>(
    payments: impl IntoIterator<Item = &'a Payment>,
    fundraisers: &[Fundraiser],
) -> Vec<PaymentRow> {
    payments
        .into_iter()
        .map(|payment| PaymentRow {
            fundraiser_title: fundraisers
                .iter()
                .find(|f| f.id == payment.fund_id)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |f| f.title.clone()),
            payment: payment.clone(),
        })
        .collect()
}

/// Calls joined with lead names.
pub fn call_rows<'a>(calls: impl IntoIterator<Item = &'a Call>, leads: &[Lead]) -> Vec<CallRow> {
    calls
        .into_iter()
        .map(|call| CallRow {
            lead_name: lead_name(leads, &call.lead_id),
            call: call.clone(),
        })
        .collect()
}

/// Users without credentials.
pub fn user_rows<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<UserRow> {
    users.into_iter().map(UserRow::from).collect()
}
