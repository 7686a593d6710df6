//! CRM-wide repository: snapshots and the multi-record writes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use leadflow_core::auth::normalize_email;
use leadflow_core::model::{
    Call, Campaign, Collection, CrmData, Fundraiser, Lead, Payment, Record, Session, User,
};
use leadflow_shared::types::UserId;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use super::Repository;
use crate::store::batch::to_document;
use crate::store::{DocumentStore, Query, StoreError, WriteBatch};

/// Field of a fundraiser holding its running total.
const COLLECTED_FIELD: &str = "collected";

/// Fundraiser fields an edit may change, with the older names they replace.
const FUNDRAISER_EDITABLE: [(&str, Option<&str>); 5] = [
    ("title", None),
    ("target", Some("amount")),
    ("endDate", None),
    ("description", Some("desc")),
    ("paymentPageId", Some("razorpayPageId")),
];

/// Typed access to every CRM collection.
#[derive(Clone)]
pub struct CrmRepository {
    store: Arc<dyn DocumentStore>,
}

impl CrmRepository {
    /// Creates a repository over a store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    fn repo<T: Record>(&self) -> Repository<T> {
        Repository::new(Arc::clone(&self.store))
    }

    /// Users.
    #[must_use]
    pub fn users(&self) -> Repository<User> {
        self.repo()
    }

    /// Campaigns.
    #[must_use]
    pub fn campaigns(&self) -> Repository<Campaign> {
        self.repo()
    }

    /// Leads.
    #[must_use]
    pub fn leads(&self) -> Repository<Lead> {
        self.repo()
    }

    /// Fundraisers.
    #[must_use]
    pub fn fundraisers(&self) -> Repository<Fundraiser> {
        self.repo()
    }

    /// Payments.
    #[must_use]
    pub fn payments(&self) -> Repository<Payment> {
        self.repo()
    }

    /// Calls.
    #[must_use]
    pub fn calls(&self) -> Repository<Call> {
        self.repo()
    }

    /// Reads every collection.
    pub async fn load_snapshot(&self) -> Result<CrmData, StoreError> {
        let (users_repo, campaigns_repo, leads_repo) = (self.users(), self.campaigns(), self.leads());
        let (fundraisers_repo, payments_repo, calls_repo) =
            (self.fundraisers(), self.payments(), self.calls());
        let (users, campaigns, leads, fundraisers, payments, calls) = tokio::try_join!(
            users_repo.all(),
            campaigns_repo.all(),
            leads_repo.all(),
            fundraisers_repo.all(),
            payments_repo.all(),
            calls_repo.all(),
        )?;
        debug!(
            users = users.len(),
            leads = leads.len(),
            fundraisers = fundraisers.len(),
            payments = payments.len(),
            "Loaded snapshot"
        );
        Ok(CrmData {
            users,
            campaigns,
            leads,
            fundraisers,
            payments,
            calls,
        })
    }

    /// Returns true if no user exists yet.
    pub async fn has_no_users(&self) -> Result<bool, StoreError> {
        Ok(self.store.list(Collection::Users).await?.is_empty())
    }

    /// Finds a user by email, case-insensitively.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let wanted = normalize_email(email);
        let exact = self.users().query(&Query::all().eq("email", wanted.as_str())).await?;
        if let Some(user) = exact.into_iter().next() {
            return Ok(Some(user));
        }
        // Records written before emails were normalized.
        Ok(self
            .users()
            .all()
            .await?
            .into_iter()
            .find(|u| normalize_email(&u.email) == wanted))
    }

    /// Stores the updated lead and its mirrored call together.
    pub async fn append_activity(&self, lead: &Lead, call: &Call) -> Result<(), StoreError> {
        self.store
            .commit(WriteBatch::new().replace(lead)?.insert(call)?)
            .await
    }

    /// Writes the editable fields of a fundraiser, leaving `collected` alone.
    pub async fn update_fundraiser_details(&self, fundraiser: &Fundraiser) -> Result<(), StoreError> {
        let document = to_document(fundraiser)?;
        let mut patch = Map::new();
        for (field, legacy) in FUNDRAISER_EDITABLE {
            patch.insert(
                field.to_string(),
                document.get(field).cloned().unwrap_or(Value::Null),
            );
            if let Some(legacy) = legacy {
                patch.insert(legacy.to_string(), Value::Null);
            }
        }
        self.store
            .merge(Collection::Fundraisers, fundraiser.id.as_str(), patch)
            .await
    }

    /// Stores a payment and adds its amount to the fundraiser's total.
    ///
    /// Fails with `StoreError::Conflict` if the external payment id is
    /// already recorded, leaving the total unchanged.
    pub async fn confirm_payment(&self, payment: &Payment) -> Result<(), StoreError> {
        if let Some(external_id) = &payment.external_payment_id {
            let existing = self
                .store
                .query(
                    Collection::Payments,
                    &Query::all().eq("externalPaymentId", external_id.as_str()).limit(1),
                )
                .await?;
            if !existing.is_empty() {
                return Err(StoreError::Conflict {
                    collection: Collection::Payments,
                    detail: format!("Payment {external_id} has already been recorded."),
                });
            }
        }

        let batch = WriteBatch::new().insert(payment)?.increment(
            Collection::Fundraisers,
            payment.fund_id.as_str(),
            COLLECTED_FIELD,
            payment.amount,
        );
        self.store.commit(batch).await
    }

    /// Stores imported leads in one batch.
    pub async fn import_leads(&self, leads: &[Lead]) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        for lead in leads {
            batch = batch.insert(lead)?;
        }
        self.store.commit(batch).await
    }

    /// Stores imported payments and credits their fundraisers in one batch.
    pub async fn import_payments(&self, payments: &[Payment]) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for payment in payments {
            batch = batch.insert(payment)?;
            *totals.entry(payment.fund_id.as_str()).or_default() += payment.amount;
        }
        for (fund_id, total) in totals {
            batch = batch.increment(Collection::Fundraisers, fund_id, COLLECTED_FIELD, total);
        }
        self.store.commit(batch).await
    }

    /// The current session, if any.
    pub async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        self.repo::<Session>().find(Session::CURRENT).await
    }

    /// Replaces the current session with one for `user_id`.
    pub async fn start_session(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Session, StoreError> {
        let session = Session::start(user_id, now);
        let batch = WriteBatch::new()
            .delete(Collection::Sessions, Session::CURRENT)
            .insert(&session)?;
        self.store.commit(batch).await?;
        Ok(session)
    }

    /// Removes the current session.
    pub async fn clear_session(&self) -> Result<(), StoreError> {
        self.store.delete(Collection::Sessions, Session::CURRENT).await
    }
}
