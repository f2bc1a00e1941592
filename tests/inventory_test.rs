mod common;

use cuentas_backend::entities::{AccountStatus, account_entity as accounts};
use cuentas_backend::error::AppError;
use cuentas_backend::models::{
    AccountQuery, BulkCreateAccountsRequest, CreateAccountRequest, UpdateAccountRequest,
};
use cuentas_backend::services::InventoryService;
use sea_orm::{EntityTrait, PaginatorTrait};

use common::{order_service, seed_account, seed_client, setup_db};

fn stock_row(platform: &str, email: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        platform: platform.to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        profile: Some("Perfil 1".to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn add_account_requires_mandatory_fields() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());

    let mut missing_email = stock_row("Netflix", "n1@stock.test");
    missing_email.email = "  ".to_string();

    let err = service.add_account(missing_email).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let count = accounts::Entity::find().count(&pool).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn new_accounts_start_available() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());

    let created = service
        .add_account(stock_row("Netflix", "n1@stock.test"))
        .await
        .unwrap();

    assert_eq!(created.status, AccountStatus::Available);
    assert_eq!(created.platform, "Netflix");
}

#[tokio::test]
async fn bulk_load_inserts_every_row() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());

    let loaded = service
        .add_accounts(vec![
            stock_row("Netflix", "n1@stock.test"),
            stock_row("Netflix", "n2@stock.test"),
            stock_row("Disney+", "d1@stock.test"),
        ])
        .await
        .unwrap();

    assert_eq!(loaded.len(), 3);
    let count = accounts::Entity::find().count(&pool).await.unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn bulk_load_with_a_bad_row_loads_nothing() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());

    let mut bad = stock_row("Netflix", "n2@stock.test");
    bad.password = String::new();

    let err = service
        .add_accounts(vec![stock_row("Netflix", "n1@stock.test"), bad])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let count = accounts::Entity::find().count(&pool).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn catalog_lists_distinct_platforms_with_stock() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Netflix", "n2@stock.test").await;
    seed_account(&pool, "Disney+", "d1@stock.test").await;

    let platforms = service.available_platforms().await.unwrap();
    assert_eq!(platforms, vec!["Disney+", "Netflix"]);

    // Assigning Disney's only row removes it from the catalog
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let orders = order_service(&pool, 30);
    let order = orders
        .create_order(
            client_id,
            cuentas_backend::models::CreateOrderRequest {
                platform: "Disney+".to_string(),
                payment_reference: None,
            },
        )
        .await
        .unwrap();
    orders.assign_account(order.id, None).await.unwrap();

    let platforms = service.available_platforms().await.unwrap();
    assert_eq!(platforms, vec!["Netflix"]);
}

#[tokio::test]
async fn update_account_edits_credentials() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());
    let account_id = seed_account(&pool, "Netflix", "old@stock.test").await;

    let updated = service
        .update_account(
            account_id,
            UpdateAccountRequest {
                platform: None,
                email: Some("new@stock.test".to_string()),
                password: Some("rotated".to_string()),
                profile: None,
                notes: Some("renewed 09/2025".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, "new@stock.test");
    assert_eq!(updated.password, "rotated");
    assert_eq!(updated.notes.as_deref(), Some("renewed 09/2025"));
    // Untouched fields survive
    assert_eq!(updated.platform, "Netflix");
    assert_eq!(updated.status, AccountStatus::Available);
}

#[tokio::test]
async fn update_missing_account_is_not_found() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());

    let err = service
        .update_account(
            999,
            UpdateAccountRequest {
                platform: None,
                email: None,
                password: None,
                profile: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn listing_filters_by_platform_and_status() {
    let pool = setup_db().await;
    let service = InventoryService::new(pool.clone());
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Netflix", "n2@stock.test").await;
    seed_account(&pool, "Disney+", "d1@stock.test").await;

    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let orders = order_service(&pool, 30);
    let order = orders
        .create_order(
            client_id,
            cuentas_backend::models::CreateOrderRequest {
                platform: "Netflix".to_string(),
                payment_reference: None,
            },
        )
        .await
        .unwrap();
    orders.assign_account(order.id, None).await.unwrap();

    let netflix = service
        .list_accounts(&AccountQuery {
            platform: Some("Netflix".to_string()),
            status: None,
            page: None,
            per_page: None,
        })
        .await
        .unwrap();
    assert_eq!(netflix.total, 2);

    let still_available = service
        .list_accounts(&AccountQuery {
            platform: Some("Netflix".to_string()),
            status: Some(AccountStatus::Available),
            page: None,
            per_page: None,
        })
        .await
        .unwrap();
    assert_eq!(still_available.total, 1);
    assert_eq!(still_available.data[0].email, "n2@stock.test");
}

#[tokio::test]
async fn bulk_request_shape_round_trips() {
    // The panel posts {"accounts": [...]} for batch loads
    let body = serde_json::json!({
        "accounts": [
            {"platform": "Netflix", "email": "n1@stock.test", "password": "secret"}
        ]
    });
    let parsed: BulkCreateAccountsRequest = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.accounts.len(), 1);
    assert!(parsed.accounts[0].profile.is_none());
}
