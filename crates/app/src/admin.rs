//! User, campaign and CSV commands. Admins only.

use chrono::Utc;
use leadflow_core::csv::{LeadImport, PaymentImport, export_leads, import_leads, import_payments};
use leadflow_core::forms::{CampaignInput, NewUserInput};
use leadflow_core::views::View;
use leadflow_shared::types::{CampaignId, UserId};
use leadflow_shared::{AppError, AppResult};
use tracing::{info, warn};

use crate::CrmApp;

impl CrmApp {
    /// Adds a user.
    pub async fn create_user(&mut self, input: NewUserInput) -> AppResult<&View> {
        self.require_admin("manage users")?;
        let existing = self.repo.users().all().await?;
        let user = input.into_user(&existing)?;

        self.repo.users().insert(&user).await?;
        info!(user_id = %user.id, email = %user.email, role = %user.role, "User created");
        self.render().await
    }

    /// Removes a user other than the current one.
    pub async fn delete_user(&mut self, id: &UserId) -> AppResult<&View> {
        let admin = self.require_admin("manage users")?;
        if &admin.id == id {
            warn!(user_id = %id, "Refused to delete the signed-in user");
            return Err(AppError::Forbidden(
                "You cannot delete your own account.".to_string(),
            ));
        }

        self.repo.users().delete(id.as_str()).await?;
        info!(user_id = %id, "User deleted");
        self.render().await
    }

    /// Adds a campaign.
    pub async fn create_campaign(&mut self, input: CampaignInput) -> AppResult<&View> {
        self.require_admin("manage campaigns")?;
        let campaign = input.into_campaign()?;

        self.repo.campaigns().insert(&campaign).await?;
        info!(campaign_id = %campaign.id, "Campaign created");
        self.render().await
    }

    /// Removes a campaign. Leads keep their campaign id and show "N/A".
    pub async fn delete_campaign(&mut self, id: &CampaignId) -> AppResult<&View> {
        self.require_admin("manage campaigns")?;
        self.repo.campaigns().delete(id.as_str()).await?;
        info!(campaign_id = %id, "Campaign deleted");
        self.render().await
    }

    /// Imports leads from CSV text, owned by the importing admin.
    pub async fn import_leads_csv(&mut self, text: &str) -> AppResult<LeadImport> {
        let admin = self.require_admin("import leads")?;
        let existing = self.repo.leads().all().await?;
        let imported = import_leads(text, &admin.email, Utc::now(), &existing)?;

        self.repo.import_leads(&imported.leads).await?;
        info!(
            imported = imported.leads.len(),
            skipped = imported.skipped,
            "Leads imported"
        );
        self.render().await?;
        Ok(imported)
    }

    /// Imports payments from a payment processor CSV export.
    pub async fn import_payments_csv(&mut self, text: &str) -> AppResult<PaymentImport> {
        let admin = self.require_admin("import payments")?;
        let fundraisers = self.repo.fundraisers().all().await?;
        let existing = self.repo.payments().all().await?;
        let imported = import_payments(text, &admin.email, Utc::now(), &fundraisers, &existing)?;

        self.repo.import_payments(&imported.payments).await?;
        info!(
            imported = imported.payments.len(),
            skipped = imported.skipped,
            "Payments imported"
        );
        self.render().await?;
        Ok(imported)
    }

    /// Every lead as CSV.
    pub async fn export_leads_csv(&self) -> AppResult<String> {
        self.require_admin("export leads")?;
        let leads = self.repo.leads().all().await?;
        info!(leads = leads.len(), "Leads exported");
        Ok(export_leads(&leads))
    }
}
