//! Dashboard cards.
//!
//! The dashboard is organisation-wide: every role sees the same totals.

use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::RenderContext;
use crate::auth::Role;
use crate::join::{NOT_AVAILABLE, campaign_label};
use crate::model::{Campaign, CrmData, Fundraiser, Payment};

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveScore {
    /// Executive name.
    pub name: String,
    /// Executive email.
    pub email: String,
    /// Sum of recent payments on fundraisers the executive owns.
    pub total: Decimal,
}

/// A recent fundraiser with its campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFundraiser {
    /// The fundraiser.
    #[serde(flatten)]
    pub fundraiser: Fundraiser,
    /// `"organisation / product"` of the fundraiser's lead's campaign.
    pub campaign_label: String,
}

/// A recent payment with the product it was raised under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayment {
    /// The payment.
    #[serde(flatten)]
    pub payment: Payment,
    /// Campaign product, through fundraiser, lead and campaign.
    pub campaign_product: String,
}

/// The dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Executives ranked by recent payments, zero totals included.
    pub top_executives: Vec<ExecutiveScore>,
    /// Newest fundraisers.
    pub recent_fundraisers: Vec<DashboardFundraiser>,
    /// Fundraisers with the most collected.
    pub top_fundraisers: Vec<Fundraiser>,
    /// Newest payments.
    pub recent_payments: Vec<DashboardPayment>,
}

/// Builds the dashboard.
#[must_use]
pub fn render(data: &CrmData, ctx: &RenderContext) -> DashboardView {
    let top = ctx.dashboard.top_count;

    let mut recent_fundraisers: Vec<&Fundraiser> = data.fundraisers.iter().collect();
    recent_fundraisers.sort_by_key(|f| Reverse(f.created_at));

    let mut top_fundraisers: Vec<&Fundraiser> = data.fundraisers.iter().collect();
    top_fundraisers.sort_by_key(|f| Reverse(f.collected));

    let mut recent_payments: Vec<&Payment> = data.payments.iter().collect();
    recent_payments.sort_by_key(|p| Reverse(p.date));

    DashboardView {
        top_executives: leaderboard(data, ctx),
        recent_fundraisers: recent_fundraisers
            .into_iter()
            .take(top)
            .map(|f| DashboardFundraiser {
                campaign_label: campaign_label(campaign_of(data, f)),
                fundraiser: f.clone(),
            })
            .collect(),
        top_fundraisers: top_fundraisers.into_iter().take(top).cloned().collect(),
        recent_payments: recent_payments
            .into_iter()
            .take(ctx.dashboard.recent_payments)
            .map(|p| DashboardPayment {
                campaign_product: data
                    .fundraiser(&p.fund_id)
                    .and_then(|f| campaign_of(data, f))
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.product.clone()),
                payment: p.clone(),
            })
            .collect(),
    }
}

fn campaign_of<'a>(data: &'a CrmData, fundraiser: &Fundraiser) -> Option<&'a Campaign> {
    data.lead(&fundraiser.lead_id)
        .and_then(|lead| data.campaign(&lead.campaign_id))
}

/// Executives ranked by payments dated within the window on fundraisers they own.
fn leaderboard(data: &CrmData, ctx: &RenderContext) -> Vec<ExecutiveScore> {
    let since = ctx
        .now
        .checked_sub_signed(Duration::days(i64::from(ctx.dashboard.leaderboard_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut scores: Vec<ExecutiveScore> = data
        .users
        .iter()
        .filter(|u| u.role == Role::Executive)
        .map(|exec| {
            let total = data
                .payments
                .iter()
                .filter(|p| p.date >= since)
                .filter(|p| {
                    data.fundraiser(&p.fund_id)
                        .is_some_and(|f| f.owner == exec.email)
                })
                .fold(Decimal::ZERO, |total, p| total.saturating_add(p.amount));
            ExecutiveScore {
                name: exec.name.clone(),
                email: exec.email.clone(),
                total,
            }
        })
        .collect();

    scores.sort_by(|a, b| b.total.cmp(&a.total));
    scores.truncate(ctx.dashboard.top_count);
    scores
}
