//! Lead and activity forms.

use chrono::{DateTime, Utc};
use leadflow_shared::types::{CampaignId, LeadId};
use serde::Deserialize;

use super::{FormError, non_blank, required};
use crate::model::{Activity, ActivityType, Call, Lead};

/// The add-lead form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLeadInput {
    /// Contact name.
    pub name: String,
    /// Selected campaign.
    pub campaign_id: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Instagram handle or profile URL.
    pub instagram: String,
}

impl NewLeadInput {
    /// Validates the form and builds the lead.
    ///
    /// # Errors
    ///
    /// - `Required` for a blank name or campaign
    /// - `MissingContact` when phone, email and Instagram are all blank
    /// - `DuplicateInstagram` when another lead has the same handle
    pub fn into_lead(
        self,
        owner: &str,
        now: DateTime<Utc>,
        existing: &[Lead],
    ) -> Result<Lead, FormError> {
        let name = required(&self.name, "Lead name")?;
        let campaign_id = required(&self.campaign_id, "Campaign")?;
        let phone = non_blank(&self.phone);
        let email = non_blank(&self.email);
        let instagram = non_blank(&self.instagram);

        if phone.is_none() && email.is_none() && instagram.is_none() {
            return Err(FormError::MissingContact);
        }

        if let Some(handle) = instagram.as_deref().map(instagram_handle) {
            let taken = existing
                .iter()
                .filter_map(|l| l.instagram.as_deref())
                .any(|other| instagram_handle(other) == handle);
            if taken {
                return Err(FormError::DuplicateInstagram);
            }
        }

        Ok(Lead {
            id: LeadId::generate(),
            name,
            phone,
            email,
            instagram,
            campaign_id: CampaignId::from(campaign_id),
            owner: owner.to_string(),
            created_at: now,
            activities: Vec::new(),
            last_activity: None,
        })
    }
}

/// Comparable form of an Instagram handle or profile URL.
///
/// `@Asha.K`, `asha.k` and `https://instagram.com/asha.k/` all give `asha.k`.
#[must_use]
pub fn instagram_handle(raw: &str) -> String {
    let lowered = raw.trim().trim_end_matches('/').to_lowercase();
    let handle = lowered
        .split_once("instagram.com/")
        .map_or(lowered.as_str(), |(_, rest)| rest.split(['?', '/']).next().unwrap_or(rest));
    handle.trim_start_matches('@').to_string()
}

/// The activity log form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Optional note.
    #[serde(default)]
    pub note: String,
}

impl ActivityInput {
    /// Builds the activity logged by `by` at `now`. A blank note is dropped.
    #[must_use]
    pub fn into_activity(self, by: &str, now: DateTime<Utc>) -> Activity {
        Activity {
            kind: self.kind,
            note: non_blank(&self.note),
            by: by.to_string(),
            when: now,
        }
    }
}

/// Appends an activity to a lead and returns its mirrored call.
///
/// The lead's `last_activity` becomes the activity's type.
pub fn log_activity(lead: &mut Lead, activity: Activity) -> Call {
    let call = Call::mirror(&lead.id, &activity);
    lead.last_activity = Some(activity.kind);
    lead.activities.push(activity);
    call
}
