//! View state.

use serde::{Deserialize, Serialize};

use super::page::Page;
use super::route::Route;
use crate::auth::SessionUser;
use crate::table::TableStates;

/// Everything a render needs besides the data: who is logged in, which
/// route is shown and the state of every table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Logged-in user, if any.
    pub current_user: Option<SessionUser>,
    /// Route currently shown.
    pub route: Route,
    /// Search, sort and page per table.
    pub tables: TableStates,
    /// Owner email the leads list is narrowed to (admins only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_owner_filter: Option<String>,
}

impl ViewState {
    /// Logged-out state on the dashboard.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            current_user: None,
            route: Route::dashboard(),
            tables: TableStates::new(per_page),
            lead_owner_filter: None,
        }
    }

    /// Page currently shown.
    #[must_use]
    pub const fn current_page(&self) -> Page {
        self.route.page
    }

    /// Returns true if the logged-in user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(SessionUser::is_admin)
    }

    /// Switches to a route.
    ///
    /// Every table goes back to page 1 with no search and the owner filter is
    /// cleared. Admin-only pages resolve to the dashboard for anyone else.
    pub fn enter(&mut self, route: Route) -> &Route {
        self.tables.reset_for_navigation();
        self.lead_owner_filter = None;
        self.route = if route.page.is_admin_only() && !self.is_admin() {
            Route::dashboard()
        } else {
            route
        };
        &self.route
    }

    /// Logs a user in, keeping table sorts.
    pub fn sign_in(&mut self, user: SessionUser) {
        self.current_user = Some(user);
    }

    /// Logs out and returns to the dashboard route.
    pub fn sign_out(&mut self) {
        self.current_user = None;
        self.route = Route::dashboard();
        self.lead_owner_filter = None;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(10)
    }
}
