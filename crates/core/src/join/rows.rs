//! Joined row types and their table fields.

use leadflow_shared::types::UserId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::Role;
use crate::model::{Call, Campaign, Fundraiser, Lead, Payment, User};
use crate::table::{FieldKind, FieldSpec, FieldValue, Tabular};

/// A lead with its campaign's product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRow {
    /// The lead.
    #[serde(flatten)]
    pub lead: Lead,
    /// Product of the lead's campaign.
    pub campaign_name: String,
}

impl Tabular for LeadRow {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<LeadRow>] = &[
            FieldSpec {
                name: "name",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.lead.name.as_str()),
            },
            FieldSpec {
                name: "phone",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.lead.phone.as_deref()),
            },
            FieldSpec {
                name: "email",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.lead.email.as_deref()),
            },
            FieldSpec {
                name: "instagram",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.lead.instagram.as_deref()),
            },
            FieldSpec {
                name: "campaignName",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.campaign_name.as_str()),
            },
            FieldSpec {
                name: "owner",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.lead.owner.as_str()),
            },
            FieldSpec {
                name: "createdAt",
                kind: FieldKind::Timestamp,
                get: |r| FieldValue::from(r.lead.created_at),
            },
            FieldSpec {
                name: "lastActivity",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.lead.last_activity.as_ref().map(|a| a.label())),
            },
        ];
        FIELDS
    }
}

/// A fundraiser with its lead's name and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserRow {
    /// The fundraiser.
    #[serde(flatten)]
    pub fundraiser: Fundraiser,
    /// Name of the fundraiser's lead.
    pub lead_name: String,
    /// Collected as a percentage of target.
    pub progress: Decimal,
}

impl Tabular for FundraiserRow {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<FundraiserRow>] = &[
            FieldSpec {
                name: "title",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.fundraiser.title.as_str()),
            },
            FieldSpec {
                name: "leadName",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.lead_name.as_str()),
            },
            FieldSpec {
                name: "target",
                kind: FieldKind::Number,
                get: |r| FieldValue::from(r.fundraiser.target),
            },
            FieldSpec {
                name: "collected",
                kind: FieldKind::Number,
                get: |r| FieldValue::from(r.fundraiser.collected),
            },
            FieldSpec {
                name: "progress",
                kind: FieldKind::Number,
                get: |r| FieldValue::from(r.progress),
            },
            FieldSpec {
                name: "owner",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.fundraiser.owner.as_str()),
            },
            FieldSpec {
                name: "createdAt",
                kind: FieldKind::Timestamp,
                get: |r| FieldValue::from(r.fundraiser.created_at),
            },
            FieldSpec {
                name: "endDate",
                kind: FieldKind::Text,
                get: |r| {
                    r.fundraiser
                        .end_date
                        .map_or(FieldValue::Missing, |d| FieldValue::Text(d.to_string()))
                },
            },
            FieldSpec {
                name: "paymentPageId",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.fundraiser.payment_page_id.as_deref()),
            },
        ];
        FIELDS
    }
}

/// A payment with its fundraiser's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    /// The payment.
    #[serde(flatten)]
    pub payment: Payment,
    /// Title of the credited fundraiser.
    pub fundraiser_title: String,
}

impl Tabular for PaymentRow {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<PaymentRow>] = &[
            FieldSpec {
                name: "donor",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.payment.donor.as_str()),
            },
            FieldSpec {
                name: "fundraiserTitle",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.fundraiser_title.as_str()),
            },
            FieldSpec {
                name: "amount",
                kind: FieldKind::Number,
                get: |r| FieldValue::from(r.payment.amount),
            },
            FieldSpec {
                name: "date",
                kind: FieldKind::Timestamp,
                get: |r| FieldValue::from(r.payment.date),
            },
            FieldSpec {
                name: "method",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.payment.method.as_str()),
            },
            FieldSpec {
                name: "recordedBy",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.payment.recorded_by.as_str()),
            },
            FieldSpec {
                name: "externalPaymentId",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.payment.external_payment_id.as_deref()),
            },
        ];
        FIELDS
    }
}

/// A call with its lead's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRow {
    /// The call.
    #[serde(flatten)]
    pub call: Call,
    /// Name of the call's lead.
    pub lead_name: String,
}

impl Tabular for CallRow {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<CallRow>] = &[
            FieldSpec {
                name: "leadName",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.lead_name.as_str()),
            },
            FieldSpec {
                name: "type",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.call.kind.label()),
            },
            FieldSpec {
                name: "note",
                kind: FieldKind::Text,
                get: |r| FieldValue::text(r.call.note.as_deref()),
            },
            FieldSpec {
                name: "by",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.call.by.as_str()),
            },
            FieldSpec {
                name: "when",
                kind: FieldKind::Timestamp,
                get: |r| FieldValue::from(r.call.when),
            },
        ];
        FIELDS
    }
}

/// A user without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: Role,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl Tabular for UserRow {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<UserRow>] = &[
            FieldSpec {
                name: "name",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.name.as_str()),
            },
            FieldSpec {
                name: "email",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.email.as_str()),
            },
            FieldSpec {
                name: "role",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.role.as_str()),
            },
        ];
        FIELDS
    }
}

/// Campaigns need no join.
pub type CampaignRow = Campaign;

impl Tabular for Campaign {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<Campaign>] = &[
            FieldSpec {
                name: "organisation",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.organisation.as_str()),
            },
            FieldSpec {
                name: "product",
                kind: FieldKind::Text,
                get: |r| FieldValue::from(r.product.as_str()),
            },
        ];
        FIELDS
    }
}
