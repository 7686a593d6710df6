//! User and campaign management.

use leadflow_shared::types::UserId;
use serde::Serialize;

use super::lists::ListView;
use crate::auth::SessionUser;
use crate::join::{CampaignRow, UserRow, user_rows};
use crate::model::CrmData;
use crate::router::ViewState;
use crate::table::TableKey;

/// The admin page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    /// Users table.
    pub users: ListView<UserRow>,
    /// Campaigns table.
    pub campaigns: ListView<CampaignRow>,
    /// The viewing admin, who cannot delete themselves.
    pub current_user_id: UserId,
}

impl AdminView {
    /// Returns true if the row's user may be deleted from this page.
    #[must_use]
    pub fn can_delete(&self, user: &UserRow) -> bool {
        user.id != self.current_user_id
    }
}

pub(super) fn render(user: &SessionUser, state: &ViewState, data: &CrmData) -> AdminView {
    AdminView {
        users: ListView::build(TableKey::Users, state, user_rows(&data.users)),
        campaigns: ListView::build(TableKey::Campaigns, state, data.campaigns.clone()),
        current_user_id: user.id.clone(),
    }
}
