//! Table state.

use leadflow_shared::types::PageRequest;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search, sort and page of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Current page (1-indexed).
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Search text; empty matches everything.
    pub search: String,
    /// Name of the sorted field.
    pub sort_field: String,
    /// Sort direction.
    pub sort_direction: SortDirection,
}

impl TableState {
    /// Creates a state on page one with no search.
    #[must_use]
    pub fn new(sort_field: &str, sort_direction: SortDirection, per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            search: String::new(),
            sort_field: sort_field.to_string(),
            sort_direction,
        }
    }

    /// The page this state points at.
    #[must_use]
    pub const fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Tables with their own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKey {
    /// Leads list.
    Leads,
    /// Fundraisers list.
    Fundraisers,
    /// Payments list.
    Payments,
    /// Calls list.
    Calls,
    /// Users table of the admin page.
    Users,
    /// Campaigns table of the admin page.
    Campaigns,
}

impl TableKey {
    /// Every table.
    pub const ALL: [Self; 6] = [
        Self::Leads,
        Self::Fundraisers,
        Self::Payments,
        Self::Calls,
        Self::Users,
        Self::Campaigns,
    ];

    /// Default sort field and direction.
    #[must_use]
    pub const fn default_sort(&self) -> (&'static str, SortDirection) {
        match self {
            Self::Leads | Self::Fundraisers => ("createdAt", SortDirection::Desc),
            Self::Payments => ("date", SortDirection::Desc),
            Self::Calls => ("when", SortDirection::Desc),
            Self::Users => ("name", SortDirection::Asc),
            Self::Campaigns => ("organisation", SortDirection::Asc),
        }
    }

    /// Initial state of this table.
    #[must_use]
    pub fn initial_state(&self, per_page: u32) -> TableState {
        let (field, direction) = self.default_sort();
        TableState::new(field, direction, per_page)
    }
}

/// State of every table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStates {
    leads: TableState,
    fundraisers: TableState,
    payments: TableState,
    calls: TableState,
    users: TableState,
    campaigns: TableState,
}

impl TableStates {
    /// Initial states with the given page size.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            leads: TableKey::Leads.initial_state(per_page),
            fundraisers: TableKey::Fundraisers.initial_state(per_page),
            payments: TableKey::Payments.initial_state(per_page),
            calls: TableKey::Calls.initial_state(per_page),
            users: TableKey::Users.initial_state(per_page),
            campaigns: TableKey::Campaigns.initial_state(per_page),
        }
    }

    /// State of one table.
    #[must_use]
    pub const fn get(&self, key: TableKey) -> &TableState {
        match key {
            TableKey::Leads => &self.leads,
            TableKey::Fundraisers => &self.fundraisers,
            TableKey::Payments => &self.payments,
            TableKey::Calls => &self.calls,
            TableKey::Users => &self.users,
            TableKey::Campaigns => &self.campaigns,
        }
    }

    /// Mutable state of one table.
    pub const fn get_mut(&mut self, key: TableKey) -> &mut TableState {
        match key {
            TableKey::Leads => &mut self.leads,
            TableKey::Fundraisers => &mut self.fundraisers,
            TableKey::Payments => &mut self.payments,
            TableKey::Calls => &mut self.calls,
            TableKey::Users => &mut self.users,
            TableKey::Campaigns => &mut self.campaigns,
        }
    }

    /// Page back to 1 and search cleared on every table. Sorts are kept.
    pub fn reset_for_navigation(&mut self) {
        for key in TableKey::ALL {
            let state = self.get_mut(key);
            state.page = 1;
            state.search.clear();
        }
    }
}

impl Default for TableStates {
    fn default() -> Self {
        Self::new(10)
    }
}
