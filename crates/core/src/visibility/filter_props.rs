//! Property-based tests for the visibility filter.
//!
//! - Executives see exactly the leads they own
//! - Admins see every record

use chrono::{TimeZone, Utc};
use leadflow_shared::types::{CampaignId, LeadId, UserId};
use proptest::prelude::*;

use super::filter::Visibility;
use crate::auth::{Role, SessionUser};
use crate::model::Lead;

const OWNERS: [&str; 3] = ["a@x.com", "b@x.com", "c@x.com"];

/// Strategy for a lead owned by one of a few users.
fn lead() -> impl Strategy<Value = Lead> {
    (0usize..OWNERS.len(), 0u32..10_000, "[a-z]{1,8}").prop_map(|(owner, n, name)| Lead {
        id: LeadId::from(format!("lead_{n}")),
        name,
        phone: Some("9999".into()),
        email: None,
        instagram: None,
        campaign_id: CampaignId::from("camp_1"),
        owner: OWNERS[owner].into(),
        created_at: Utc.timestamp_opt(1_700_000_000 + i64::from(n), 0).unwrap(),
        activities: Vec::new(),
        last_activity: None,
    })
}

fn session(email: &str, role: Role) -> SessionUser {
    SessionUser {
        id: UserId::from("user_1"),
        name: "User".into(),
        email: email.into(),
        role,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An executive's visible leads are exactly those with their email as owner,
    /// in the original order.
    #[test]
    fn prop_executive_sees_only_own_leads(
        leads in prop::collection::vec(lead(), 0..40),
        who in 0usize..OWNERS.len(),
    ) {
        let user = session(OWNERS[who], Role::Executive);
        let visible = Visibility::for_user(&user).leads(&leads);
        let expected: Vec<&Lead> = leads.iter().filter(|l| l.owner == OWNERS[who]).collect();

        prop_assert_eq!(visible, expected);
    }

    /// An admin sees the input unchanged.
    #[test]
    fn prop_admin_sees_all_leads(leads in prop::collection::vec(lead(), 0..40)) {
        let user = session("root@x.com", Role::Admin);
        let visible = Visibility::for_user(&user).leads(&leads);

        prop_assert_eq!(visible.len(), leads.len());
    }
}
