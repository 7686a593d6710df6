//! Table pages.

use leadflow_shared::types::PageResponse;
use serde::Serialize;

use crate::auth::{Role, SessionUser};
use crate::join::{
    CallRow, FundraiserRow, LeadRow, PaymentRow, UserRow, call_rows, fundraiser_rows, lead_rows,
    payment_rows, user_rows,
};
use crate::model::CrmData;
use crate::router::ViewState;
use crate::table::{TableKey, TableState, Tabular, process};
use crate::visibility::Visibility;

/// One processed table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<R> {
    /// Which table.
    pub table: TableKey,
    /// Search, sort and page applied.
    pub state: TableState,
    /// The page of rows with totals.
    pub rows: PageResponse<R>,
}

impl<R: Tabular> ListView<R> {
    /// Processes rows with the state of `table`.
    #[must_use]
    pub fn build(table: TableKey, state: &ViewState, rows: Vec<R>) -> Self {
        let table_state = state.tables.get(table).clone();
        Self {
            table,
            rows: process(rows, &table_state),
            state: table_state,
        }
    }
}

/// The leads page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadListView {
    /// The leads table.
    pub list: ListView<LeadRow>,
    /// Owner the list is narrowed to.
    pub owner_filter: Option<String>,
    /// Executives an admin can narrow to; empty for executives.
    pub owner_choices: Vec<UserRow>,
    /// Whether import and export are offered.
    pub can_exchange_csv: bool,
}

/// The payments page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListView {
    /// The payments table.
    pub list: ListView<PaymentRow>,
    /// Whether payment import is offered.
    pub can_import: bool,
}

pub(super) fn leads(user: &SessionUser, state: &ViewState, data: &CrmData) -> LeadListView {
    let mut visible = Visibility::for_user(user).leads(&data.leads);
    let owner_filter = state.lead_owner_filter.clone().filter(|_| user.is_admin());
    if let Some(owner) = &owner_filter {
        visible.retain(|l| &l.owner == owner);
    }

    let owner_choices = if user.is_admin() {
        user_rows(data.users.iter().filter(|u| u.role == Role::Executive))
    } else {
        Vec::new()
    };

    LeadListView {
        list: ListView::build(TableKey::Leads, state, lead_rows(visible, &data.campaigns)),
        owner_filter,
        owner_choices,
        can_exchange_csv: user.is_admin(),
    }
}

pub(super) fn fundraisers(
    user: &SessionUser,
    state: &ViewState,
    data: &CrmData,
) -> ListView<FundraiserRow> {
    let visible = Visibility::for_user(user).fundraisers(&data.fundraisers);
    ListView::build(TableKey::Fundraisers, state, fundraiser_rows(visible, &data.leads))
}

pub(super) fn payments(user: &SessionUser, state: &ViewState, data: &CrmData) -> PaymentListView {
    let visible = Visibility::for_user(user).payments(&data.payments, &data.fundraisers);
    PaymentListView {
        list: ListView::build(
            TableKey::Payments,
            state,
            payment_rows(visible, &data.fundraisers),
        ),
        can_import: user.is_admin(),
    }
}

pub(super) fn calls(user: &SessionUser, state: &ViewState, data: &CrmData) -> ListView<CallRow> {
    let visible = Visibility::for_user(user).calls(&data.calls);
    ListView::build(TableKey::Calls, state, call_rows(visible, &data.leads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Campaign, Lead, User};
    use chrono::{Duration, TimeZone, Utc};
    use leadflow_shared::types::{CampaignId, LeadId, UserId};

    fn session(email: &str, role: Role) -> SessionUser {
        SessionUser {
            id: UserId::from("user_1"),
            name: "User".into(),
            email: email.into(),
            role,
        }
    }

    fn data() -> CrmData {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let leads = (0..15)
            .map(|n| Lead {
                id: LeadId::from(format!("lead_{n}")),
                name: format!("Lead {n}"),
                phone: Some(format!("98{n:08}")),
                email: None,
                instagram: None,
                campaign_id: CampaignId::from("camp_1"),
                owner: if n % 3 == 0 { "b@x.com" } else { "a@x.com" }.into(),
                created_at: base + Duration::hours(n),
                activities: Vec::new(),
                last_activity: None,
            })
            .collect();
        CrmData {
            users: vec![User {
                id: UserId::from("user_b"),
                name: "Bala".into(),
                email: "b@x.com".into(),
                password_hash: String::new(),
                role: Role::Executive,
            }],
            campaigns: vec![Campaign {
                id: CampaignId::from("camp_1"),
                organisation: "Org".into(),
                product: "Drive".into(),
            }],
            leads,
            ..CrmData::default()
        }
    }

    #[test]
    fn test_executive_leads_are_own_and_newest_first() {
        let user = session("a@x.com", Role::Executive);
        let mut state = ViewState::default();
        state.sign_in(user.clone());

        let view = leads(&user, &state, &data());
        assert_eq!(view.list.rows.meta.total, 10);
        assert_eq!(view.list.rows.data[0].lead.name, "Lead 14");
        assert!(view.list.rows.data.iter().all(|r| r.lead.owner == "a@x.com"));
        assert!(view.owner_choices.is_empty());
        assert!(!view.can_exchange_csv);
    }

    #[test]
    fn test_admin_owner_filter() {
        let user = session("admin@x.com", Role::Admin);
        let mut state = ViewState::default();
        state.sign_in(user.clone());
        state.lead_owner_filter = Some("b@x.com".into());

        let view = leads(&user, &state, &data());
        assert_eq!(view.list.rows.meta.total, 5);
        assert_eq!(view.owner_choices.len(), 1);
        assert_eq!(view.list.rows.data[0].campaign_name, "Drive");
    }

    #[test]
    fn test_executive_owner_filter_is_ignored() {
        let user = session("a@x.com", Role::Executive);
        let mut state = ViewState::default();
        state.lead_owner_filter = Some("b@x.com".into());

        let view = leads(&user, &state, &data());
        assert_eq!(view.owner_filter, None);
        assert_eq!(view.list.rows.meta.total, 10);
    }
}
