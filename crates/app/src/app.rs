//! `CrmApp` and rendering.

use std::sync::Arc;

use leadflow_core::auth::SessionUser;
use leadflow_core::router::ViewState;
use leadflow_core::views::{self, RenderContext, View};
use leadflow_db::CrmRepository;
use leadflow_db::store::{DocumentStore, Subscription};
use leadflow_shared::config::DashboardConfig;
use leadflow_shared::{AppConfig, AppError, AppResult};
use tracing::debug;

/// The controller behind one user's screen.
///
/// Holds the view state, the last rendered view and a subscription to the
/// collections the current page shows. Navigating replaces the
/// subscription; dropping the app releases it.
pub struct CrmApp {
    pub(crate) repo: CrmRepository,
    pub(crate) state: ViewState,
    pub(crate) dashboard: DashboardConfig,
    pub(crate) scope: Option<Subscription>,
    pub(crate) view: View,
}

impl CrmApp {
    /// Creates a signed-out app over a store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        Self {
            repo: CrmRepository::new(store),
            state: ViewState::new(config.tables.per_page),
            dashboard: config.dashboard.clone(),
            scope: None,
            view: View::SignedOut,
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Last rendered view.
    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Repository over the app's store.
    #[must_use]
    pub const fn repository(&self) -> &CrmRepository {
        &self.repo
    }

    /// The signed-in user.
    pub(crate) fn require_user(&self) -> AppResult<SessionUser> {
        self.state
            .current_user
            .clone()
            .ok_or_else(|| AppError::Unauthorized("Please log in.".to_string()))
    }

    /// The signed-in user, who must be an admin.
    pub(crate) fn require_admin(&self, action: &str) -> AppResult<SessionUser> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AppError::Forbidden(format!("Only admins can {action}.")))
        }
    }

    /// Re-renders the current route from a fresh snapshot.
    pub(crate) async fn render(&mut self) -> AppResult<&View> {
        if self.state.current_user.is_none() {
            self.view = View::SignedOut;
            return Ok(&self.view);
        }
        let data = self.repo.load_snapshot().await?;
        let ctx = RenderContext::now(self.dashboard.clone());
        self.view = views::render(&self.state, &data, &ctx);
        debug!(page = %self.state.current_page(), "Rendered view");
        Ok(&self.view)
    }
}
