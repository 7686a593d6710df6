//! Pure page renderers.
//!
//! [`render`] turns the view state and a data snapshot into a [`View`]: the
//! rows, totals and flags a page shows, with no markup or formatting.
//!
//! # Modules
//!
//! - `dashboard` - Leaderboard, recent and top fundraisers, recent payments
//! - `lists` - Leads, fundraisers, payments and calls tables
//! - `detail` - Lead detail, add-lead form, fundraiser form and detail
//! - `admin` - User and campaign management

pub mod admin;
pub mod dashboard;
pub mod detail;
pub mod lists;

pub use admin::AdminView;
pub use dashboard::{DashboardFundraiser, DashboardPayment, DashboardView, ExecutiveScore};
pub use detail::{
    AddLeadView, CampaignChoice, FormMode, FundraiserDetailView, FundraiserFormView,
    LeadDetailView,
};
pub use lists::{LeadListView, ListView, PaymentListView};

use chrono::{DateTime, Utc};
use leadflow_shared::config::DashboardConfig;
use serde::Serialize;

use crate::auth::SessionUser;
use crate::join::{CallRow, FundraiserRow};
use crate::model::CrmData;
use crate::router::{Page, ViewState};

/// Shown when a lead id resolves to nothing the user may see.
pub const LEAD_NOT_FOUND: &str = "Lead not found.";
/// Shown when a fundraiser id resolves to nothing the user may see.
pub const FUNDRAISER_NOT_FOUND: &str = "Fundraiser not found.";
/// Shown when a fundraiser form has no usable lead.
pub const LEAD_OF_FUNDRAISER_NOT_FOUND: &str = "Associated lead not found.";

/// Inputs to a render besides state and data.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Current time, for the leaderboard window.
    pub now: DateTime<Utc>,
    /// Dashboard sizes.
    pub dashboard: DashboardConfig,
}

impl RenderContext {
    /// Context at the current time.
    #[must_use]
    pub fn now(dashboard: DashboardConfig) -> Self {
        Self {
            now: Utc::now(),
            dashboard,
        }
    }
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum View {
    /// Nobody is logged in.
    SignedOut,
    /// Dashboard cards.
    Dashboard(DashboardView),
    /// Leads table.
    Leads(LeadListView),
    /// One lead.
    LeadDetail(Box<LeadDetailView>),
    /// New lead form.
    AddLead(AddLeadView),
    /// Fundraisers table.
    Fundraisers(ListView<FundraiserRow>),
    /// Fundraiser create or edit form.
    FundraiserForm(Box<FundraiserFormView>),
    /// One fundraiser with its payments.
    FundraiserDetail(Box<FundraiserDetailView>),
    /// Payments table.
    Payments(PaymentListView),
    /// Calls table.
    Calls(ListView<CallRow>),
    /// User and campaign management.
    Admin(AdminView),
    /// A literal not-found message.
    NotFound(String),
}

impl View {
    /// Page this view belongs to; `None` for signed-out and not-found views.
    #[must_use]
    pub const fn page(&self) -> Option<Page> {
        match self {
            Self::SignedOut | Self::NotFound(_) => None,
            Self::Dashboard(_) => Some(Page::Dashboard),
            Self::Leads(_) => Some(Page::Leads),
            Self::LeadDetail(_) => Some(Page::LeadDetail),
            Self::AddLead(_) => Some(Page::AddLead),
            Self::Fundraisers(_) => Some(Page::Fundraisers),
            Self::FundraiserForm(_) => Some(Page::FundraiserCreate),
            Self::FundraiserDetail(_) => Some(Page::FundraiserDetail),
            Self::Payments(_) => Some(Page::Payments),
            Self::Calls(_) => Some(Page::Calls),
            Self::Admin(_) => Some(Page::Admin),
        }
    }
}

/// Renders the current route for the logged-in user.
#[must_use]
pub fn render(state: &ViewState, data: &CrmData, ctx: &RenderContext) -> View {
    let Some(user) = state.current_user.as_ref() else {
        return View::SignedOut;
    };
    render_page(user, state, data, ctx)
}

fn render_page(user: &SessionUser, state: &ViewState, data: &CrmData, ctx: &RenderContext) -> View {
    let params = &state.route.params;
    match state.route.page {
        Page::Dashboard => View::Dashboard(dashboard::render(data, ctx)),
        Page::Leads => View::Leads(lists::leads(user, state, data)),
        Page::LeadDetail => detail::lead(user, data, params.id.as_deref()),
        Page::AddLead => View::AddLead(detail::add_lead(data)),
        Page::Fundraisers => View::Fundraisers(lists::fundraisers(user, state, data)),
        Page::FundraiserCreate => detail::fundraiser_form(
            user,
            data,
            params.lead_id.as_deref(),
            params.fund_id.as_deref(),
        ),
        Page::FundraiserDetail => detail::fundraiser(user, data, params.id.as_deref()),
        Page::Payments => View::Payments(lists::payments(user, state, data)),
        Page::Calls => View::Calls(lists::calls(user, state, data)),
        Page::Admin if user.is_admin() => View::Admin(admin::render(user, state, data)),
        Page::Admin => View::Dashboard(dashboard::render(data, ctx)),
    }
}
