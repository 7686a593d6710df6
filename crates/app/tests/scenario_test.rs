//! End-to-end scenarios over an in-memory store.

mod common;

use common::{ADMIN_EMAIL, EXEC_EMAIL, OTHER_EXEC_EMAIL, PASSWORD, seeded, signed_in};
use leadflow_app::CrmApp;
use leadflow_core::forms::{
    ActivityInput, CampaignInput, FundraiserInput, LoginInput, NewLeadInput, PaymentInput,
};
use leadflow_core::model::ActivityType;
use leadflow_core::router::{Page, Route};
use leadflow_core::table::{SortDirection, TableKey};
use leadflow_core::views::View;
use leadflow_shared::AppConfig;
use leadflow_shared::types::{FundraiserId, LeadId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn lead_input(name: &str, campaign_id: &str, phone: &str) -> NewLeadInput {
    NewLeadInput {
        name: name.into(),
        campaign_id: campaign_id.into(),
        phone: phone.into(),
        ..NewLeadInput::default()
    }
}

fn fundraiser_input(title: &str, target: Decimal) -> FundraiserInput {
    FundraiserInput {
        title: title.into(),
        target,
        end_date: None,
        description: String::new(),
        payment_page_id: String::new(),
    }
}

fn payment_input(amount: Decimal, external: &str) -> PaymentInput {
    PaymentInput {
        donor: "Meera".into(),
        amount,
        date: None,
        method: "UPI".into(),
        external_payment_id: external.into(),
    }
}

fn lead_id_of(view: &View) -> LeadId {
    match view {
        View::LeadDetail(detail) => detail.lead.id.clone(),
        other => panic!("expected lead detail, got {other:?}"),
    }
}

#[tokio::test]
async fn test_asha_lead_activity_appears_in_calls() {
    let (store, _admin, campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    let view = asha
        .create_lead(lead_input("Kiran", campaign.id.as_str(), "9999999999"))
        .await
        .unwrap();
    let lead_id = lead_id_of(view);

    let view = asha
        .add_activity(
            &lead_id,
            ActivityInput {
                kind: ActivityType::Called,
                note: "Asked to call back".into(),
            },
        )
        .await
        .unwrap();
    let View::LeadDetail(detail) = view else {
        panic!("expected lead detail");
    };
    assert_eq!(detail.lead.last_activity, Some(ActivityType::Called));
    assert_eq!(detail.activities.len(), 1);
    assert_eq!(detail.campaign_label, "Helping Hands / Meals");

    let View::Calls(calls) = asha.navigate("#calls").await.unwrap() else {
        panic!("expected calls");
    };
    assert_eq!(calls.rows.meta.total, 1);
    let row = &calls.rows.data[0];
    assert_eq!(row.lead_name, "Kiran");
    assert_eq!(row.call.by, EXEC_EMAIL);
    assert_eq!(row.call.note.as_deref(), Some("Asked to call back"));
}

#[tokio::test]
async fn test_payment_moves_fundraiser_to_forty_percent() {
    let (store, _admin, campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    let lead_id = lead_id_of(
        asha.create_lead(lead_input("Kiran", campaign.id.as_str(), "1"))
            .await
            .unwrap(),
    );
    asha.go(Route::fundraiser_create(&lead_id)).await.unwrap();
    let View::LeadDetail(detail) = asha
        .save_fundraiser(fundraiser_input("School fees", dec!(1000)))
        .await
        .unwrap()
    else {
        panic!("expected lead detail");
    };
    let fund_id = detail.fundraisers[0].fundraiser.id.clone();
    assert_eq!(detail.fundraisers[0].fundraiser.owner, EXEC_EMAIL);

    let View::FundraiserDetail(fund) = asha
        .confirm_payment(&fund_id, payment_input(dec!(400), "rzp_001"))
        .await
        .unwrap()
    else {
        panic!("expected fundraiser detail");
    };
    assert_eq!(fund.fundraiser.fundraiser.collected, dec!(400));
    assert_eq!(fund.fundraiser.progress, dec!(40));
    assert_eq!(fund.payments.len(), 1);
}

#[tokio::test]
async fn test_duplicate_external_payment_id_is_rejected() {
    let (store, _admin, campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    let lead_id = lead_id_of(
        asha.create_lead(lead_input("Kiran", campaign.id.as_str(), "1"))
            .await
            .unwrap(),
    );
    asha.go(Route::fundraiser_create(&lead_id)).await.unwrap();
    asha.save_fundraiser(fundraiser_input("School fees", dec!(1000)))
        .await
        .unwrap();
    let fund = asha.repository().fundraisers().all().await.unwrap().remove(0);

    asha.confirm_payment(&fund.id, payment_input(dec!(400), "rzp_001"))
        .await
        .unwrap();
    let err = asha
        .confirm_payment(&fund.id, payment_input(dec!(100), "rzp_001"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");
    assert_eq!(err.alert_message(), "Payment rzp_001 has already been recorded.");

    let stored = asha
        .repository()
        .fundraisers()
        .find(fund.id.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.collected, dec!(400));
    assert_eq!(asha.repository().payments().all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_executive_is_redirected_from_admin_page() {
    let (store, _admin, _campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    let view = asha.navigate("#admin").await.unwrap();
    assert!(matches!(view, View::Dashboard(_)));
    assert_eq!(asha.state().current_page(), Page::Dashboard);

    let err = asha
        .create_campaign(CampaignInput {
            organisation: "Org".into(),
            product: "Product".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_sees_users_and_campaigns_on_admin_page() {
    let (_store, mut admin, campaign) = seeded().await;

    let View::Admin(page) = admin.navigate("#admin").await.unwrap() else {
        panic!("expected admin page");
    };
    let users: Vec<&str> = page.users.rows.data.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(users, vec!["Admin", "Asha", "Ravi"]);
    assert_eq!(page.campaigns.rows.meta.total, 1);
    assert_eq!(page.campaigns.rows.data[0].id, campaign.id);

    let me = page.users.rows.data.iter().find(|u| u.email == ADMIN_EMAIL).unwrap();
    assert!(!page.can_delete(me));
    assert_eq!(admin.state().current_page(), Page::Admin);
}

#[tokio::test]
async fn test_executives_only_see_their_own_leads() {
    let (store, mut admin, campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;
    let mut ravi = signed_in(&store, OTHER_EXEC_EMAIL).await;

    let asha_lead = lead_id_of(
        asha.create_lead(lead_input("Kiran", campaign.id.as_str(), "1"))
            .await
            .unwrap(),
    );
    ravi.create_lead(lead_input("Lata", campaign.id.as_str(), "2"))
        .await
        .unwrap();

    let View::Leads(leads) = asha.navigate("#leads").await.unwrap() else {
        panic!("expected leads");
    };
    assert_eq!(leads.list.rows.meta.total, 1);
    assert_eq!(leads.list.rows.data[0].lead.name, "Kiran");
    assert!(!leads.can_exchange_csv);

    let view = ravi
        .navigate(&Route::lead_detail(&asha_lead).to_fragment())
        .await
        .unwrap();
    assert_eq!(view, &View::NotFound("Lead not found.".to_string()));

    let View::Leads(all) = admin.navigate("#leads").await.unwrap() else {
        panic!("expected leads");
    };
    assert_eq!(all.list.rows.meta.total, 2);

    let View::Leads(filtered) = admin.set_lead_owner_filter(Some(OTHER_EXEC_EMAIL)).await.unwrap() else {
        panic!("expected leads");
    };
    assert_eq!(filtered.list.rows.meta.total, 1);
    assert_eq!(filtered.list.rows.data[0].lead.owner, OTHER_EXEC_EMAIL);
}

#[tokio::test]
async fn test_validation_aborts_before_write() {
    let (store, _admin, campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    let err = asha
        .create_lead(lead_input("Kiran", campaign.id.as_str(), " "))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(err.alert_message(), "Provide at least one contact method.");
    assert!(asha.repository().leads().all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_navigation_resets_search_but_keeps_sort() {
    let (store, _admin, _campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    asha.navigate("#leads").await.unwrap();
    asha.set_search(TableKey::Leads, "kir").await.unwrap();
    asha.toggle_sort(TableKey::Leads, "name").await.unwrap();
    asha.change_page(TableKey::Leads, 3).await.unwrap();

    asha.navigate("#calls").await.unwrap();
    let state = asha.state().tables.get(TableKey::Leads);
    assert_eq!(state.page, 1);
    assert!(state.search.is_empty());
    assert_eq!(state.sort_field, "name");
    assert_eq!(state.sort_direction, SortDirection::Desc);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (store, _admin, _campaign) = seeded().await;
    let mut app = CrmApp::new(store, &AppConfig::default());

    let err = app
        .login(LoginInput {
            email: ADMIN_EMAIL.to_uppercase(),
            password: "wrong".into(),
        })
        .await
        .err()
        .unwrap();
    assert_eq!(err.error_code(), "UNAUTHORIZED");
    assert_eq!(err.alert_message(), "Invalid email or password.");

    let view = app
        .login(LoginInput {
            email: ADMIN_EMAIL.to_uppercase(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    assert!(matches!(view, View::Dashboard(_)));
}

#[tokio::test]
async fn test_unknown_fundraiser_is_not_found() {
    let (store, _admin, _campaign) = seeded().await;
    let mut asha = signed_in(&store, EXEC_EMAIL).await;

    let err = asha
        .confirm_payment(&FundraiserId::from("fund_missing"), payment_input(dec!(10), ""))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
    assert_eq!(err.alert_message(), "Fundraiser not found.");
}
