//! Lead, activity, fundraiser and payment commands.
//!
//! Each command validates fully before writing, then shows the page the
//! user continues on.

use chrono::Utc;
use leadflow_core::auth::SessionUser;
use leadflow_core::forms::{ActivityInput, FundraiserInput, NewLeadInput, PaymentInput, log_activity};
use leadflow_core::model::{Fundraiser, Lead};
use leadflow_core::router::Route;
use leadflow_core::views::{FUNDRAISER_NOT_FOUND, LEAD_NOT_FOUND, LEAD_OF_FUNDRAISER_NOT_FOUND, View};
use leadflow_core::visibility::Visibility;
use leadflow_shared::types::{FundraiserId, LeadId};
use leadflow_shared::{AppError, AppResult};
use tracing::info;

use crate::CrmApp;

impl CrmApp {
    /// Creates a lead owned by the current user and shows it.
    pub async fn create_lead(&mut self, input: NewLeadInput) -> AppResult<&View> {
        let user = self.require_user()?;
        let existing = self.repo.leads().all().await?;
        let lead = input.into_lead(&user.email, Utc::now(), &existing)?;

        self.repo.leads().insert(&lead).await?;
        info!(lead_id = %lead.id, owner = %lead.owner, "Lead created");

        self.go(Route::lead_detail(&lead.id)).await
    }

    /// Logs an activity on a lead, updating the lead and the calls list
    /// together.
    pub async fn add_activity(&mut self, lead_id: &LeadId, input: ActivityInput) -> AppResult<&View> {
        let user = self.require_user()?;
        let mut lead = self.visible_lead(&user, lead_id).await?;

        let activity = input.into_activity(&user.email, Utc::now());
        let call = log_activity(&mut lead, activity);
        self.repo.append_activity(&lead, &call).await?;
        info!(lead_id = %lead.id, call_id = %call.id, kind = %call.kind, "Activity logged");

        self.render().await
    }

    /// Saves the fundraiser form of the current route.
    ///
    /// With a `fundId` the fundraiser is edited, leaving `collected` alone;
    /// otherwise one is created for `leadId`, owned by the lead's owner.
    pub async fn save_fundraiser(&mut self, input: FundraiserInput) -> AppResult<&View> {
        let user = self.require_user()?;
        let params = self.state.route.params.clone();

        let lead_id = if let Some(fund_id) = params.fund_id.as_deref() {
            let mut fundraiser = self.visible_fundraiser(&user, &FundraiserId::from(fund_id)).await?;
            input.apply_to(&mut fundraiser)?;
            self.repo.update_fundraiser_details(&fundraiser).await?;
            info!(fund_id = %fundraiser.id, "Fundraiser updated");
            fundraiser.lead_id
        } else {
            let lead_id = params
                .lead_id
                .as_deref()
                .ok_or_else(|| AppError::NotFound(LEAD_OF_FUNDRAISER_NOT_FOUND.to_string()))?;
            let lead = match self.visible_lead(&user, &LeadId::from(lead_id)).await {
                Err(AppError::NotFound(_)) => {
                    return Err(AppError::NotFound(LEAD_OF_FUNDRAISER_NOT_FOUND.to_string()));
                }
                found => found?,
            };
            let fundraiser = input.into_fundraiser(&lead, Utc::now())?;
            self.repo.fundraisers().insert(&fundraiser).await?;
            info!(fund_id = %fundraiser.id, lead_id = %lead.id, "Fundraiser created");
            lead.id
        };

        self.go(Route::lead_detail(&lead_id)).await
    }

    /// Records a payment against a fundraiser and shows the fundraiser.
    pub async fn confirm_payment(&mut self, fund_id: &FundraiserId, input: PaymentInput) -> AppResult<&View> {
        let user = self.require_user()?;
        let fundraiser = self.visible_fundraiser(&user, fund_id).await?;
        let existing = self.repo.payments().all().await?;
        let payment = input.into_payment(&fundraiser.id, &user.email, Utc::now(), &existing)?;

        self.repo.confirm_payment(&payment).await?;
        info!(
            payment_id = %payment.id,
            fund_id = %fundraiser.id,
            amount = %payment.amount,
            "Payment confirmed"
        );

        self.go(Route::fundraiser_detail(&fundraiser.id)).await
    }

    async fn visible_lead(&self, user: &SessionUser, id: &LeadId) -> AppResult<Lead> {
        self.repo
            .leads()
            .find(id.as_str())
            .await?
            .filter(|lead| Visibility::for_user(user).can_see_lead(lead))
            .ok_or_else(|| AppError::NotFound(LEAD_NOT_FOUND.to_string()))
    }

    async fn visible_fundraiser(&self, user: &SessionUser, id: &FundraiserId) -> AppResult<Fundraiser> {
        self.repo
            .fundraisers()
            .find(id.as_str())
            .await?
            .filter(|fund| Visibility::for_user(user).can_see_fundraiser(fund))
            .ok_or_else(|| AppError::NotFound(FUNDRAISER_NOT_FOUND.to_string()))
    }
}
