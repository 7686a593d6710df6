//! Single-record pages and forms.

use leadflow_shared::types::{CampaignId, FundraiserId, LeadId};
use serde::Serialize;

use super::{FUNDRAISER_NOT_FOUND, LEAD_NOT_FOUND, LEAD_OF_FUNDRAISER_NOT_FOUND, View};
use crate::auth::SessionUser;
use crate::join::{FundraiserRow, campaign_label, fundraiser_rows};
use crate::model::{Activity, ActivityType, CrmData, Fundraiser, Lead, Payment};
use crate::visibility::Visibility;

/// A lead with its history and fundraisers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDetailView {
    /// The lead.
    pub lead: Lead,
    /// `"organisation / product"` of the lead's campaign.
    pub campaign_label: String,
    /// Activities, newest first.
    pub activities: Vec<Activity>,
    /// Fundraisers created for the lead, with progress.
    pub fundraisers: Vec<FundraiserRow>,
    /// Activity types the log form offers.
    pub activity_types: Vec<ActivityType>,
}

/// A campaign option of the add-lead form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignChoice {
    /// Campaign ID.
    pub id: CampaignId,
    /// `"organisation / product"`.
    pub label: String,
}

/// The add-lead form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLeadView {
    /// Campaigns to choose from.
    pub campaigns: Vec<CampaignChoice>,
}

/// Whether the fundraiser form creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// New fundraiser for a lead.
    Create,
    /// Existing fundraiser.
    Edit,
}

/// The fundraiser form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserFormView {
    /// Create or edit.
    pub mode: FormMode,
    /// Lead the fundraiser belongs to.
    pub lead: Lead,
    /// Current values when editing.
    pub fundraiser: Option<Fundraiser>,
}

/// A fundraiser with its payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserDetailView {
    /// The fundraiser with lead name and progress.
    pub fundraiser: FundraiserRow,
    /// `"organisation / product"` through the fundraiser's lead.
    pub campaign_label: String,
    /// Payments, newest first.
    pub payments: Vec<Payment>,
}

pub(super) fn lead(user: &SessionUser, data: &CrmData, id: Option<&str>) -> View {
    let filter = Visibility::for_user(user);
    let Some(lead) = id
        .and_then(|id| data.lead(&LeadId::from(id)))
        .filter(|lead| filter.can_see_lead(lead))
    else {
        return View::NotFound(LEAD_NOT_FOUND.to_string());
    };

    View::LeadDetail(Box::new(LeadDetailView {
        campaign_label: campaign_label(data.campaign(&lead.campaign_id)),
        activities: lead.activities.iter().rev().cloned().collect(),
        fundraisers: fundraiser_rows(data.fundraisers_for_lead(&lead.id), &data.leads),
        activity_types: ActivityType::ALL.to_vec(),
        lead: lead.clone(),
    }))
}

pub(super) fn add_lead(data: &CrmData) -> AddLeadView {
    AddLeadView {
        campaigns: data
            .campaigns
            .iter()
            .map(|c| CampaignChoice {
                id: c.id.clone(),
                label: campaign_label(Some(c)),
            })
            .collect(),
    }
}

/// Editing by `fund_id` wins over creating for `lead_id`.
pub(super) fn fundraiser_form(
    user: &SessionUser,
    data: &CrmData,
    lead_id: Option<&str>,
    fund_id: Option<&str>,
) -> View {
    let filter = Visibility::for_user(user);

    let (mode, fundraiser, lead_id) = match fund_id {
        Some(fund_id) => {
            let Some(fundraiser) = data
                .fundraiser(&FundraiserId::from(fund_id))
                .filter(|f| filter.can_see_fundraiser(f))
            else {
                return View::NotFound(FUNDRAISER_NOT_FOUND.to_string());
            };
            (FormMode::Edit, Some(fundraiser.clone()), Some(fundraiser.lead_id.clone()))
        }
        None => (FormMode::Create, None, lead_id.map(LeadId::from)),
    };

    let Some(lead) = lead_id
        .and_then(|id| data.lead(&id).cloned())
        .filter(|lead| mode == FormMode::Edit || filter.can_see_lead(lead))
    else {
        return View::NotFound(LEAD_OF_FUNDRAISER_NOT_FOUND.to_string());
    };

    View::FundraiserForm(Box::new(FundraiserFormView {
        mode,
        lead,
        fundraiser,
    }))
}

pub(super) fn fundraiser(user: &SessionUser, data: &CrmData, id: Option<&str>) -> View {
    let filter = Visibility::for_user(user);
    let Some(fundraiser) = id
        .and_then(|id| data.fundraiser(&FundraiserId::from(id)))
        .filter(|f| filter.can_see_fundraiser(f))
    else {
        return View::NotFound(FUNDRAISER_NOT_FOUND.to_string());
    };

    let mut payments: Vec<Payment> = data.payments_for_fundraiser(&fundraiser.id).cloned().collect();
    payments.sort_by(|a, b| b.date.cmp(&a.date));

    let campaign = data
        .lead(&fundraiser.lead_id)
        .and_then(|lead| data.campaign(&lead.campaign_id));

    let Some(row) = fundraiser_rows([fundraiser], &data.leads).pop() else {
        return View::NotFound(FUNDRAISER_NOT_FOUND.to_string());
    };

    View::FundraiserDetail(Box::new(FundraiserDetailView {
        fundraiser: row,
        campaign_label: campaign_label(campaign),
        payments,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::join::NOT_AVAILABLE;
    use crate::model::Campaign;
    use chrono::{TimeZone, Utc};
    use leadflow_shared::types::{PaymentId, UserId};
    use rust_decimal_macros::dec;

    fn session(email: &str, role: Role) -> SessionUser {
        SessionUser {
            id: UserId::from("user_1"),
            name: "User".into(),
            email: email.into(),
            role,
        }
    }

    fn activity(kind: ActivityType, day: u32) -> Activity {
        Activity {
            kind,
            note: None,
            by: "a@x.com".into(),
            when: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
        }
    }

    fn data() -> CrmData {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        CrmData {
            campaigns: vec![Campaign {
                id: CampaignId::from("camp_1"),
                organisation: "Helping Hands".into(),
                product: "School Drive".into(),
            }],
            leads: vec![Lead {
                id: LeadId::from("lead_1"),
                name: "Asha".into(),
                phone: Some("9999".into()),
                email: None,
                instagram: None,
                campaign_id: CampaignId::from("camp_1"),
                owner: "a@x.com".into(),
                created_at: created,
                activities: vec![
                    activity(ActivityType::Called, 2),
                    activity(ActivityType::FollowUp, 3),
                ],
                last_activity: Some(ActivityType::FollowUp),
            }],
            fundraisers: vec![Fundraiser {
                id: FundraiserId::from("fund_1"),
                lead_id: LeadId::from("lead_1"),
                title: "Roof".into(),
                target: dec!(1000),
                collected: dec!(400),
                owner: "a@x.com".into(),
                created_at: created,
                end_date: None,
                description: None,
                payment_page_id: None,
            }],
            payments: vec![
                Payment {
                    id: PaymentId::from("pay_old"),
                    fund_id: FundraiserId::from("fund_1"),
                    donor: "Ravi".into(),
                    amount: dec!(100),
                    date: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
                    method: "Cash".into(),
                    recorded_by: "a@x.com".into(),
                    external_payment_id: None,
                },
                Payment {
                    id: PaymentId::from("pay_new"),
                    fund_id: FundraiserId::from("fund_1"),
                    donor: "Meena".into(),
                    amount: dec!(300),
                    date: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
                    method: "UPI".into(),
                    recorded_by: "a@x.com".into(),
                    external_payment_id: Some("pay_ext_1".into()),
                },
            ],
            ..CrmData::default()
        }
    }

    #[test]
    fn test_lead_detail_newest_activity_first() {
        let View::LeadDetail(view) = lead(&session("a@x.com", Role::Executive), &data(), Some("lead_1")) else {
            panic!("expected lead detail");
        };

        assert_eq!(view.activities[0].kind, ActivityType::FollowUp);
        assert_eq!(view.campaign_label, "Helping Hands / School Drive");
        assert_eq!(view.fundraisers[0].progress, dec!(40));
    }

    #[test]
    fn test_lead_detail_not_found() {
        let exec = session("a@x.com", Role::Executive);
        assert_eq!(lead(&exec, &data(), Some("lead_404")), View::NotFound("Lead not found.".into()));
        assert_eq!(lead(&exec, &data(), None), View::NotFound("Lead not found.".into()));

        let other = session("b@x.com", Role::Executive);
        assert_eq!(lead(&other, &data(), Some("lead_1")), View::NotFound("Lead not found.".into()));
    }

    #[test]
    fn test_fundraiser_form_modes() {
        let exec = session("a@x.com", Role::Executive);

        let View::FundraiserForm(create) = fundraiser_form(&exec, &data(), Some("lead_1"), None) else {
            panic!("expected form");
        };
        assert_eq!(create.mode, FormMode::Create);
        assert!(create.fundraiser.is_none());

        let View::FundraiserForm(edit) = fundraiser_form(&exec, &data(), None, Some("fund_1")) else {
            panic!("expected form");
        };
        assert_eq!(edit.mode, FormMode::Edit);
        assert_eq!(edit.lead.name, "Asha");
    }

    #[test]
    fn test_fundraiser_form_not_found_messages() {
        let exec = session("a@x.com", Role::Executive);

        assert_eq!(
            fundraiser_form(&exec, &data(), None, Some("fund_404")),
            View::NotFound("Fundraiser not found.".into())
        );
        assert_eq!(
            fundraiser_form(&exec, &data(), Some("lead_404"), None),
            View::NotFound("Associated lead not found.".into())
        );
        assert_eq!(
            fundraiser_form(&exec, &data(), None, None),
            View::NotFound("Associated lead not found.".into())
        );
    }

    #[test]
    fn test_fundraiser_detail_payments_newest_first() {
        let admin = session("root@x.com", Role::Admin);
        let View::FundraiserDetail(view) = fundraiser(&admin, &data(), Some("fund_1")) else {
            panic!("expected fundraiser detail");
        };

        assert_eq!(view.payments[0].id.as_str(), "pay_new");
        assert_eq!(view.fundraiser.lead_name, "Asha");
        assert_ne!(view.campaign_label, NOT_AVAILABLE);
    }

    #[test]
    fn test_add_lead_lists_campaigns() {
        let view = add_lead(&data());
        assert_eq!(view.campaigns[0].label, "Helping Hands / School Drive");
    }
}
