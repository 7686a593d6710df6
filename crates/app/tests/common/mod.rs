//! Shared setup for app scenario tests.

#![allow(dead_code)]

use std::sync::Arc;

use leadflow_app::CrmApp;
use leadflow_core::auth::Role;
use leadflow_core::forms::{BootstrapInput, CampaignInput, LoginInput, NewUserInput};
use leadflow_core::model::Campaign;
use leadflow_db::store::{DocumentStore, MemoryStore};
use leadflow_shared::AppConfig;

pub const ADMIN_EMAIL: &str = "admin@leadflow.test";
pub const EXEC_EMAIL: &str = "asha@leadflow.test";
pub const OTHER_EXEC_EMAIL: &str = "ravi@leadflow.test";
pub const PASSWORD: &str = "correct horse";

/// A memory store with an admin, two executives and one campaign, plus an
/// app signed in as the admin.
pub async fn seeded() -> (Arc<dyn DocumentStore>, CrmApp, Campaign) {
    seeded_in(Arc::new(MemoryStore::new())).await
}

/// Seeds `store` the same way as [`seeded`].
pub async fn seeded_in(store: Arc<dyn DocumentStore>) -> (Arc<dyn DocumentStore>, CrmApp, Campaign) {
    let mut admin = CrmApp::new(Arc::clone(&store), &AppConfig::default());

    admin
        .bootstrap_admin(BootstrapInput {
            name: "Admin".into(),
            email: ADMIN_EMAIL.into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();

    for (name, email) in [("Asha", EXEC_EMAIL), ("Ravi", OTHER_EXEC_EMAIL)] {
        admin
            .create_user(NewUserInput {
                name: name.into(),
                email: email.into(),
                password: PASSWORD.into(),
                role: Role::Executive,
            })
            .await
            .unwrap();
    }

    admin
        .create_campaign(CampaignInput {
            organisation: "Helping Hands".into(),
            product: "Meals".into(),
        })
        .await
        .unwrap();
    let campaign = admin
        .repository()
        .campaigns()
        .all()
        .await
        .unwrap()
        .remove(0);

    (store, admin, campaign)
}

/// An app signed in as `email`.
pub async fn signed_in(store: &Arc<dyn DocumentStore>, email: &str) -> CrmApp {
    let mut app = CrmApp::new(Arc::clone(store), &AppConfig::default());
    app.login(LoginInput {
        email: email.into(),
        password: PASSWORD.into(),
    })
    .await
    .unwrap();
    app
}
