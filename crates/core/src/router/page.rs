//! Application pages.

use serde::{Deserialize, Serialize};

/// A page reachable by route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Leaderboard, recent and top fundraisers, recent payments.
    #[default]
    Dashboard,
    /// Leads list.
    Leads,
    /// One lead with its activities and fundraisers.
    LeadDetail,
    /// New lead form.
    AddLead,
    /// Fundraisers list.
    Fundraisers,
    /// Fundraiser create or edit form.
    FundraiserCreate,
    /// One fundraiser with its payments.
    FundraiserDetail,
    /// Payments list.
    Payments,
    /// Calls list.
    Calls,
    /// User and campaign management.
    Admin,
}

impl Page {
    /// Every page.
    pub const ALL: [Self; 10] = [
        Self::Dashboard,
        Self::Leads,
        Self::LeadDetail,
        Self::AddLead,
        Self::Fundraisers,
        Self::FundraiserCreate,
        Self::FundraiserDetail,
        Self::Payments,
        Self::Calls,
        Self::Admin,
    ];

    /// Route name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Leads => "leads",
            Self::LeadDetail => "lead_detail",
            Self::AddLead => "add_lead",
            Self::Fundraisers => "fundraisers",
            Self::FundraiserCreate => "fundraiser_create",
            Self::FundraiserDetail => "fundraiser_detail",
            Self::Payments => "payments",
            Self::Calls => "calls",
            Self::Admin => "admin",
        }
    }

    /// Resolves a route name; unknown names fall back to the dashboard.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .unwrap_or_default()
    }

    /// Returns true for pages only admins may open.
    #[must_use]
    pub const fn is_admin_only(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
