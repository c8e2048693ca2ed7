use std::str::FromStr;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use crm_core::types::DbId;
use crm_db::models::campaign::CampaignForm;
use crm_db::models::contract::ContractForm;
use crm_db::models::potential_client::PotentialClientForm;
use crm_db::models::service::ServiceForm;
use crm_db::models::user::CreateUser;
use crm_db::repositories::{
    ActiveClientRepo, CampaignRepo, ContractRepo, GroupRepo, PotentialClientRepo, ServiceRepo,
    UserRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn new_service(pool: &PgPool, name: &str) -> DbId {
    let form = ServiceForm {
        name: name.to_string(),
        description: "SEO audit".to_string(),
        cost: dec("100.00"),
    };
    ServiceRepo::create(pool, &form).await.unwrap().id
}

async fn new_campaign(pool: &PgPool, service_id: DbId) -> DbId {
    let form = CampaignForm {
        name: "Spring push".to_string(),
        service_id,
        promotion_channel: "email".to_string(),
        budget: dec("1000.00"),
    };
    CampaignRepo::create(pool, &form).await.unwrap().id
}

async fn new_lead(pool: &PgPool, campaign_id: DbId, full_name: &str) -> DbId {
    let form = PotentialClientForm {
        full_name: full_name.to_string(),
        phone: "79990001122".to_string(),
        email: "lead@example.com".to_string(),
        campaign_id,
    };
    PotentialClientRepo::create(pool, &form).await.unwrap().id
}

fn contract_form(service_id: DbId, name: &str) -> ContractForm {
    ContractForm {
        name: name.to_string(),
        service_id,
        document: "documents/contract.pdf".to_string(),
        conclusion_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        validity_period: 365,
        amount: dec("2500.00"),
    }
}

async fn new_contract(pool: &PgPool, service_id: DbId, name: &str) -> DbId {
    ContractRepo::create(pool, &contract_form(service_id, name))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_crud(pool: PgPool) {
    let id = new_service(&pool, "Test Service").await;

    let found = ServiceRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(found.name, "Test Service");
    assert_eq!(found.cost, dec("100.00"));

    let update = ServiceForm {
        name: "Renamed".to_string(),
        description: "Full audit".to_string(),
        cost: dec("150.50"),
    };
    let updated = ServiceRepo::update(&pool, id, &update).await.unwrap().unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description, "Full audit");
    assert_eq!(updated.cost, dec("150.50"));

    assert!(ServiceRepo::delete(&pool, id).await.unwrap());
    assert!(ServiceRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(!ServiceRepo::delete(&pool, id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_service_returns_none(pool: PgPool) {
    let form = ServiceForm {
        name: "Ghost".to_string(),
        description: String::new(),
        cost: Decimal::ZERO,
    };
    assert!(ServiceRepo::update(&pool, 999_999, &form).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    let first = new_service(&pool, "First").await;
    let second = new_service(&pool, "Second").await;

    let ids: Vec<DbId> = ServiceRepo::list(&pool)
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_cost_violates_check(pool: PgPool) {
    let form = ServiceForm {
        name: "Bad".to_string(),
        description: String::new(),
        cost: dec("-1.00"),
    };
    let err = ServiceRepo::create(&pool, &form).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23514"));
}

// ---------------------------------------------------------------------------
// Relationships and cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campaign_requires_existing_service(pool: PgPool) {
    let form = CampaignForm {
        name: "Orphan".to_string(),
        service_id: 999_999,
        promotion_channel: "tv".to_string(),
        budget: Decimal::ZERO,
    };
    let err = CampaignRepo::create(&pool, &form).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_delete_cascades(pool: PgPool) {
    let service_id = new_service(&pool, "Doomed").await;
    let campaign_id = new_campaign(&pool, service_id).await;
    let lead_id = new_lead(&pool, campaign_id, "Ivan Petrov").await;
    let contract_id = new_contract(&pool, service_id, "Doomed contract").await;
    let client = ActiveClientRepo::create(&pool, lead_id, contract_id).await.unwrap();

    let other_service = new_service(&pool, "Survivor").await;
    let other_campaign = new_campaign(&pool, other_service).await;

    assert!(ServiceRepo::delete(&pool, service_id).await.unwrap());

    assert!(CampaignRepo::find_by_id(&pool, campaign_id).await.unwrap().is_none());
    assert!(ContractRepo::find_by_id(&pool, contract_id).await.unwrap().is_none());
    assert!(PotentialClientRepo::find_by_id(&pool, lead_id).await.unwrap().is_none());
    assert!(ActiveClientRepo::find_by_id(&pool, client.id).await.unwrap().is_none());

    assert!(CampaignRepo::find_by_id(&pool, other_campaign).await.unwrap().is_some());
    assert_eq!(CampaignRepo::list_by_service(&pool, other_service).await.unwrap().len(), 1);
    assert!(ContractRepo::list_by_service(&pool, service_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contract_delete_cascades_to_active_client(pool: PgPool) {
    let service_id = new_service(&pool, "Service").await;
    let campaign_id = new_campaign(&pool, service_id).await;
    let lead_id = new_lead(&pool, campaign_id, "Anna").await;
    let contract_id = new_contract(&pool, service_id, "Contract").await;
    let client = ActiveClientRepo::create(&pool, lead_id, contract_id).await.unwrap();

    assert!(ContractRepo::delete(&pool, contract_id).await.unwrap());

    assert!(ActiveClientRepo::find_by_id(&pool, client.id).await.unwrap().is_none());
    // The lead survives; only the conversion is gone.
    assert!(PotentialClientRepo::find_by_id(&pool, lead_id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Active clients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_client_uniqueness(pool: PgPool) {
    let service_id = new_service(&pool, "Service").await;
    let campaign_id = new_campaign(&pool, service_id).await;
    let lead_a = new_lead(&pool, campaign_id, "Lead A").await;
    let lead_b = new_lead(&pool, campaign_id, "Lead B").await;
    let contract_a = new_contract(&pool, service_id, "Contract A").await;
    let contract_b = new_contract(&pool, service_id, "Contract B").await;

    ActiveClientRepo::create(&pool, lead_a, contract_a).await.unwrap();

    // Same lead, different contract.
    let err = ActiveClientRepo::create(&pool, lead_a, contract_b).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db)
            if db.constraint() == Some("uq_active_clients_potential_client_id")
    );

    // Same contract, different lead.
    let err = ActiveClientRepo::create(&pool, lead_b, contract_a).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("uq_active_clients_contract_id")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_client_details_and_conversions(pool: PgPool) {
    let service_id = new_service(&pool, "Service").await;
    let campaign_id = new_campaign(&pool, service_id).await;
    let converted = new_lead(&pool, campaign_id, "Maria Ivanova").await;
    let pending = new_lead(&pool, campaign_id, "Oleg Sidorov").await;
    let contract_id = new_contract(&pool, service_id, "Annual support").await;

    let client = ActiveClientRepo::create(&pool, converted, contract_id).await.unwrap();

    let detail = ActiveClientRepo::find_detail_by_id(&pool, client.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.full_name, "Maria Ivanova");
    assert_eq!(detail.contract_name, "Annual support");

    let details = ActiveClientRepo::list_details(&pool).await.unwrap();
    assert_eq!(details.len(), 1);

    let ids = ActiveClientRepo::converted_potential_client_ids(&pool, &[converted, pending])
        .await
        .unwrap();
    assert_eq!(ids, vec![converted]);

    let by_lead = ActiveClientRepo::find_by_potential_client(&pool, converted)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_lead.contract_id, contract_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_client_update_relinks(pool: PgPool) {
    let service_id = new_service(&pool, "Service").await;
    let campaign_id = new_campaign(&pool, service_id).await;
    let lead_a = new_lead(&pool, campaign_id, "Lead A").await;
    let lead_b = new_lead(&pool, campaign_id, "Lead B").await;
    let contract_a = new_contract(&pool, service_id, "Contract A").await;
    let contract_b = new_contract(&pool, service_id, "Contract B").await;

    let client = ActiveClientRepo::create(&pool, lead_a, contract_a).await.unwrap();
    let updated = ActiveClientRepo::update(&pool, client.id, lead_b, contract_b)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.potential_client_id, lead_b);
    assert_eq!(updated.contract_id, contract_b);

    assert!(ActiveClientRepo::update(&pool, 999_999, lead_a, contract_a)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_membership(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "marketer".to_string(),
            email: "marketer@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            is_superuser: false,
        },
    )
    .await
    .unwrap();

    assert!(GroupRepo::add_member(&pool, user.id, "Operator").await.unwrap());
    assert!(GroupRepo::add_member(&pool, user.id, "Marketer").await.unwrap());
    // Already a member.
    assert!(!GroupRepo::add_member(&pool, user.id, "Marketer").await.unwrap());
    // No such group.
    assert!(!GroupRepo::add_member(&pool, user.id, "Accountant").await.unwrap());

    let names = GroupRepo::names_for_user(&pool, user.id).await.unwrap();
    assert_eq!(names, vec!["Marketer".to_string(), "Operator".to_string()]);
}
