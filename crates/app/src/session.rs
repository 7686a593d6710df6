//! Bootstrap, login, logout and session restore.

use chrono::Utc;
use leadflow_core::auth::SessionUser;
use leadflow_core::forms::{BootstrapInput, FormError, LoginInput};
use leadflow_core::router::Route;
use leadflow_core::views::View;
use leadflow_shared::{AppError, AppResult};
use tracing::{info, warn};

use crate::CrmApp;

impl CrmApp {
    /// Returns true until the first user exists.
    pub async fn needs_bootstrap(&self) -> AppResult<bool> {
        Ok(self.repo.has_no_users().await?)
    }

    /// Creates the first admin and logs them in.
    pub async fn bootstrap_admin(&mut self, input: BootstrapInput) -> AppResult<&View> {
        if !self.needs_bootstrap().await? {
            warn!("Bootstrap attempted with existing users");
            return Err(AppError::Forbidden(
                "An admin account already exists.".to_string(),
            ));
        }

        let admin = input.into_admin()?;
        self.repo.users().insert(&admin).await?;
        info!(user_id = %admin.id, email = %admin.email, "Bootstrap admin created");

        self.start(SessionUser::from(&admin)).await
    }

    /// Logs in with email and password.
    pub async fn login(&mut self, input: LoginInput) -> AppResult<&View> {
        let users = self.repo.users().all().await?;
        let user = match input.authenticate(&users) {
            Ok(user) => SessionUser::from(user),
            Err(err @ FormError::InvalidCredentials) => {
                info!(email = %input.email, "Failed login attempt");
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        info!(user_id = %user.id, "User logged in successfully");
        self.start(user).await
    }

    /// Ends the session.
    pub async fn logout(&mut self) -> AppResult<&View> {
        self.repo.clear_session().await?;
        if let Some(user) = &self.state.current_user {
            info!(user_id = %user.id, "User logged out");
        }
        self.state.sign_out();
        self.scope = None;
        self.view = View::SignedOut;
        Ok(&self.view)
    }

    /// Resumes the stored session if its user still exists.
    ///
    /// A session pointing at a deleted user is cleared. Returns true if a
    /// user is now signed in.
    pub async fn restore_session(&mut self) -> AppResult<bool> {
        let Some(session) = self.repo.current_session().await? else {
            return Ok(false);
        };

        match self.repo.users().find(session.user_id.as_str()).await? {
            Some(user) => {
                info!(user_id = %user.id, "Session restored");
                self.state.sign_in(SessionUser::from(&user));
                self.go(Route::dashboard()).await?;
                Ok(true)
            }
            None => {
                warn!(user_id = %session.user_id, "Clearing session of deleted user");
                self.repo.clear_session().await?;
                Ok(false)
            }
        }
    }

    async fn start(&mut self, user: SessionUser) -> AppResult<&View> {
        self.repo.start_session(user.id.clone(), Utc::now()).await?;
        self.state.sign_in(user);
        self.go(Route::dashboard()).await
    }
}
