//! Store seeder for LeadFlow development and testing.
//!
//! Seeds a bootstrap admin, two executives, campaigns, leads with logged
//! activities, fundraisers and payments into the configured store.
//! Running it again against a seeded store changes nothing.
//!
//! Usage: cargo run --bin seeder
//!
//! The admin credentials come from `LEADFLOW_SEED_ADMIN_EMAIL` and
//! `LEADFLOW_SEED_ADMIN_PASSWORD`.

use std::str::FromStr;

use anyhow::Context;
use leadflow_app::CrmApp;
use leadflow_core::auth::Role;
use leadflow_core::forms::{
    ActivityInput, BootstrapInput, CampaignInput, FundraiserInput, LoginInput, NewLeadInput,
    NewUserInput, PaymentInput,
};
use leadflow_core::model::ActivityType;
use leadflow_core::router::Route;
use leadflow_core::views::View;
use leadflow_db::open_store;
use leadflow_shared::AppConfig;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shared password of the seeded executives.
const EXECUTIVE_PASSWORD: &str = "executive";

const EXECUTIVES: [(&str, &str); 2] = [
    ("Asha Menon", "asha@leadflow.local"),
    ("Ravi Kumar", "ravi@leadflow.local"),
];

const CAMPAIGNS: [(&str, &str); 2] = [
    ("Helping Hands", "Meal Kits"),
    ("Bright Futures", "School Fees"),
];

/// Lead name, phone, Instagram handle, campaign index.
const LEADS: [(&str, &str, &str, usize); 3] = [
    ("Kiran Rao", "9876500001", "", 0),
    ("Lata Iyer", "", "@lata.iyer", 1),
    ("Mohan Das", "9876500003", "", 1),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = open_store(&config.storage).await?;
    let mut admin = CrmApp::new(store.clone(), &config);

    let admin_email =
        std::env::var("LEADFLOW_SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@leadflow.local".into());
    let admin_password =
        std::env::var("LEADFLOW_SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());

    if admin.needs_bootstrap().await? {
        info!(email = %admin_email, "Seeding bootstrap admin");
        admin
            .bootstrap_admin(BootstrapInput {
                name: "Administrator".into(),
                email: admin_email,
                password: admin_password,
            })
            .await?;
    } else {
        admin
            .login(LoginInput {
                email: admin_email,
                password: admin_password,
            })
            .await
            .context("Store already has users; set the seed admin credentials")?;
    }

    if !admin.repository().leads().all().await?.is_empty() {
        info!("Store already has leads, nothing to seed");
        return Ok(());
    }

    seed_users(&mut admin).await?;
    seed_campaigns(&mut admin).await?;
    seed_pipeline(&mut CrmApp::new(store, &config)).await?;

    admin.logout().await?;
    info!("Seeding complete");
    Ok(())
}

async fn seed_users(admin: &mut CrmApp) -> anyhow::Result<()> {
    for (name, email) in EXECUTIVES {
        if admin.repository().find_user_by_email(email).await?.is_some() {
            continue;
        }
        admin
            .create_user(NewUserInput {
                name: name.into(),
                email: email.into(),
                password: EXECUTIVE_PASSWORD.into(),
                role: Role::Executive,
            })
            .await?;
    }
    info!(count = EXECUTIVES.len(), "Seeded executives");
    Ok(())
}

async fn seed_campaigns(admin: &mut CrmApp) -> anyhow::Result<()> {
    if !admin.repository().campaigns().all().await?.is_empty() {
        return Ok(());
    }
    for (organisation, product) in CAMPAIGNS {
        admin
            .create_campaign(CampaignInput {
                organisation: organisation.into(),
                product: product.into(),
            })
            .await?;
    }
    info!(count = CAMPAIGNS.len(), "Seeded campaigns");
    Ok(())
}

/// Leads, activities, a fundraiser and a payment, entered by the first
/// executive.
async fn seed_pipeline(exec: &mut CrmApp) -> anyhow::Result<()> {
    let (_, email) = EXECUTIVES[0];
    exec.login(LoginInput {
        email: email.into(),
        password: EXECUTIVE_PASSWORD.into(),
    })
    .await?;

    let campaigns = exec.repository().campaigns().all().await?;
    let mut first_lead = None;

    for (name, phone, instagram, campaign) in LEADS {
        let campaign = campaigns
            .get(campaign)
            .context("Seeded campaign missing")?;
        let view = exec
            .create_lead(NewLeadInput {
                name: name.into(),
                campaign_id: campaign.id.to_string(),
                phone: phone.into(),
                email: String::new(),
                instagram: instagram.into(),
            })
            .await?;
        let View::LeadDetail(detail) = view else {
            anyhow::bail!("Creating lead {name} did not show the lead");
        };
        let lead_id = detail.lead.id.clone();

        exec.add_activity(
            &lead_id,
            ActivityInput {
                kind: ActivityType::Called,
                note: "Introductory call".into(),
            },
        )
        .await?;
        first_lead.get_or_insert(lead_id);
    }
    info!(count = LEADS.len(), "Seeded leads");

    let lead_id = first_lead.context("No lead seeded")?;
    exec.go(Route::fundraiser_create(&lead_id)).await?;
    exec.save_fundraiser(FundraiserInput {
        title: "Community kitchen".into(),
        target: Decimal::from(50_000),
        end_date: None,
        description: "Monthly meal kits for 40 families".into(),
        payment_page_id: "pl_seed_kitchen".into(),
    })
    .await?;

    let fundraiser = exec
        .repository()
        .fundraisers()
        .all()
        .await?
        .into_iter()
        .next()
        .context("Seeded fundraiser missing")?;
    exec.confirm_payment(
        &fundraiser.id,
        PaymentInput {
            donor: "Meera Pillai".into(),
            amount: Decimal::from_str("12500.00")?,
            date: None,
            method: "UPI".into(),
            external_payment_id: "pay_seed_0001".into(),
        },
    )
    .await?;
    info!(fund_id = %fundraiser.id, "Seeded fundraiser and payment");

    exec.logout().await?;
    Ok(())
}
