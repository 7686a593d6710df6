//! Routes, table interactions and change subscriptions.

use leadflow_core::model::Collection;
use leadflow_core::router::{Page, Route};
use leadflow_core::table::{TableKey, toggle_sort};
use leadflow_core::views::View;
use leadflow_db::store::Subscription;
use leadflow_shared::{AppError, AppResult};
use tracing::{debug, info};

use crate::CrmApp;

/// Collections a page reads, and so the changes it re-renders on.
#[must_use]
pub const fn watched_collections(page: Page) -> &'static [Collection] {
    match page {
        Page::Dashboard => &[
            Collection::Users,
            Collection::Campaigns,
            Collection::Leads,
            Collection::Fundraisers,
            Collection::Payments,
        ],
        Page::Leads => &[Collection::Leads, Collection::Campaigns, Collection::Users],
        Page::LeadDetail => &[
            Collection::Leads,
            Collection::Campaigns,
            Collection::Fundraisers,
        ],
        Page::AddLead => &[Collection::Campaigns],
        Page::Fundraisers | Page::FundraiserCreate => &[Collection::Fundraisers, Collection::Leads],
        Page::FundraiserDetail => &[
            Collection::Fundraisers,
            Collection::Payments,
            Collection::Leads,
            Collection::Campaigns,
        ],
        Page::Payments => &[Collection::Payments, Collection::Fundraisers],
        Page::Calls => &[Collection::Calls, Collection::Leads],
        Page::Admin => &[Collection::Users, Collection::Campaigns],
    }
}

impl CrmApp {
    /// Shows the page a location fragment names.
    pub async fn navigate(&mut self, fragment: &str) -> AppResult<&View> {
        self.go(Route::parse(fragment)).await
    }

    /// Shows a route.
    ///
    /// Every table returns to page 1 with no search, admin-only pages fall
    /// back to the dashboard for executives, and the subscription moves to
    /// the collections of the new page.
    pub async fn go(&mut self, route: Route) -> AppResult<&View> {
        if self.state.current_user.is_none() {
            self.scope = None;
            return self.render().await;
        }

        let requested = route.page;
        let page = self.state.enter(route).page;
        if page != requested {
            info!(requested = %requested, shown = %page, "Redirected to dashboard");
        }
        self.rescope(page);
        self.render().await
    }

    /// Re-renders the current route.
    pub async fn refresh(&mut self) -> AppResult<&View> {
        if let Some(scope) = self.scope.as_mut() {
            // The render below covers anything already pending.
            let _ = scope.drain_pending();
        }
        self.render().await
    }

    /// Waits for a change to a collection the current page reads and
    /// re-renders. Returns `None` when nothing is subscribed.
    pub async fn next_change(&mut self) -> AppResult<Option<&View>> {
        let Some(scope) = self.scope.as_mut() else {
            return Ok(None);
        };
        let Some(event) = scope.changed().await else {
            return Ok(None);
        };
        debug!(collections = ?event.collections, "Watched collections changed");
        self.render().await.map(Some)
    }

    /// Sets a table's search text.
    pub async fn set_search(&mut self, table: TableKey, search: &str) -> AppResult<&View> {
        self.require_user()?;
        self.state.tables.get_mut(table).search = search.to_string();
        self.render().await
    }

    /// Sorts a table by a field, flipping direction on repeat.
    pub async fn toggle_sort(&mut self, table: TableKey, field: &str) -> AppResult<&View> {
        self.require_user()?;
        toggle_sort(self.state.tables.get_mut(table), field);
        self.render().await
    }

    /// Moves a table to a page.
    pub async fn change_page(&mut self, table: TableKey, page: u32) -> AppResult<&View> {
        self.require_user()?;
        if page == 0 {
            return Err(AppError::Validation("Page must be at least 1.".to_string()));
        }
        self.state.tables.get_mut(table).page = page;
        self.render().await
    }

    /// Narrows the leads list to one owner, or clears the filter.
    pub async fn set_lead_owner_filter(&mut self, owner: Option<&str>) -> AppResult<&View> {
        self.require_admin("filter leads by owner")?;
        self.state.lead_owner_filter = owner
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string);
        self.state.tables.get_mut(TableKey::Leads).page = 1;
        self.render().await
    }

    pub(crate) fn rescope(&mut self, page: Page) {
        let watched = watched_collections(page).iter().copied();
        self.scope = Some(Subscription::new(self.repo.store().as_ref(), watched));
    }
}
