//! CRM record types.

use chrono::{DateTime, NaiveDate, Utc};
use leadflow_shared::types::{CallId, CampaignId, FundraiserId, LeadId, PaymentId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::collection::{Collection, Record};
use super::serde_helpers::non_blank;
use crate::auth::Role;

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Lower-cased, unique email.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Role.
    pub role: Role,
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// An organisation/product pairing leads are classified under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign ID.
    pub id: CampaignId,
    /// Organisation name.
    pub organisation: String,
    /// Product or campaign name.
    pub product: String,
}

impl Record for Campaign {
    const COLLECTION: Collection = Collection::Campaigns;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Result of an interaction with a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    /// Phone call made.
    Called,
    /// Email sent.
    Emailed,
    /// Follow-up scheduled or done.
    #[serde(rename = "Follow-up")]
    FollowUp,
    /// Lead declined.
    #[serde(rename = "Not Interested")]
    NotInterested,
    /// Direct message sent.
    #[serde(rename = "DMed")]
    Dmed,
    /// Lead converted.
    Success,
}

impl ActivityType {
    /// Every activity type, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Called,
        Self::Emailed,
        Self::FollowUp,
        Self::NotInterested,
        Self::Dmed,
        Self::Success,
    ];

    /// Display label, identical to the stored value.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Called => "Called",
            Self::Emailed => "Emailed",
            Self::FollowUp => "Follow-up",
            Self::NotInterested => "Not Interested",
            Self::Dmed => "DMed",
            Self::Success => "Success",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown activity type: {s}"))
    }
}

/// An interaction logged against a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Free-text note.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Email of the user who logged it.
    pub by: String,
    /// When it was logged.
    pub when: DateTime<Utc>,
}

/// A prospective contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Lead ID.
    pub id: LeadId,
    /// Contact name.
    pub name: String,
    /// Phone number.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Instagram handle or profile URL.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    /// Campaign the lead belongs to; may dangle after a campaign is deleted.
    pub campaign_id: CampaignId,
    /// Email of the owning user.
    pub owner: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Append-only activity log, oldest first.
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Type of the newest activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<ActivityType>,
}

impl Lead {
    /// Returns true if at least one contact method is present.
    #[must_use]
    pub fn has_contact(&self) -> bool {
        self.phone.is_some() || self.email.is_some() || self.instagram.is_some()
    }
}

impl Record for Lead {
    const COLLECTION: Collection = Collection::Leads;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Top-level mirror of an activity, for cross-lead reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// Call ID.
    pub id: CallId,
    /// Lead the activity belongs to.
    pub lead_id: LeadId,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Free-text note.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Email of the user who logged it.
    pub by: String,
    /// When it was logged.
    pub when: DateTime<Utc>,
}

impl Call {
    /// Builds the mirrored call record of an activity.
    #[must_use]
    pub fn mirror(lead_id: &LeadId, activity: &Activity) -> Self {
        Self {
            id: CallId::generate(),
            lead_id: lead_id.clone(),
            kind: activity.kind,
            note: activity.note.clone(),
            by: activity.by.clone(),
            when: activity.when,
        }
    }

    /// Returns true if this call mirrors the given activity.
    #[must_use]
    pub fn mirrors(&self, lead_id: &LeadId, activity: &Activity) -> bool {
        &self.lead_id == lead_id
            && self.kind == activity.kind
            && self.note == activity.note
            && self.by == activity.by
            && self.when == activity.when
    }
}

impl Record for Call {
    const COLLECTION: Collection = Collection::Calls;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// A fundraising campaign instance tied to a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundraiser {
    /// Fundraiser ID.
    pub id: FundraiserId,
    /// Lead the fundraiser was created for.
    pub lead_id: LeadId,
    /// Title.
    pub title: String,
    /// Target amount.
    #[serde(alias = "amount")]
    pub target: Decimal,
    /// Running total of confirmed payments.
    #[serde(default)]
    pub collected: Decimal,
    /// Email of the owning user.
    pub owner: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional end date.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Optional description.
    #[serde(
        default,
        alias = "desc",
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// External payment page id, used to match imported payments.
    #[serde(
        default,
        alias = "razorpayPageId",
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_page_id: Option<String>,
}

impl Fundraiser {
    /// Collected amount as a percentage of the target, two decimals.
    ///
    /// Zero when the target is zero; `Decimal::MAX` when the ratio overflows.
    #[must_use]
    pub fn progress_percent(&self) -> Decimal {
        if self.target.is_zero() {
            return Decimal::ZERO;
        }
        self.collected
            .checked_div(self.target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::MAX, |percent| percent.round_dp(2))
    }
}

impl Record for Fundraiser {
    const COLLECTION: Collection = Collection::Fundraisers;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// A single contribution applied to a fundraiser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Fundraiser credited.
    pub fund_id: FundraiserId,
    /// Donor name.
    pub donor: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Payment date.
    pub date: DateTime<Utc>,
    /// Payment method label.
    pub method: String,
    /// Email of the user who recorded it.
    pub recorded_by: String,
    /// Payment processor id; unique when present.
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub external_payment_id: Option<String>,
}

impl Record for Payment {
    const COLLECTION: Collection = Collection::Payments;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// The current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Always [`Session::CURRENT`].
    pub id: String,
    /// Logged-in user.
    pub user_id: UserId,
    /// Login time.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Id of the single session record.
    pub const CURRENT: &'static str = "current";

    /// Starts a session for a user.
    #[must_use]
    pub fn start(user_id: UserId, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Self::CURRENT.to_string(),
            user_id,
            started_at,
        }
    }
}

impl Record for Session {
    const COLLECTION: Collection = Collection::Sessions;

    fn record_id(&self) -> &str {
        &self.id
    }
}
