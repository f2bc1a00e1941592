mod common;

use chrono::Duration;
use cuentas_backend::entities::{
    AccountStatus, OrderStatus, account_entity as accounts, order_entity as orders,
};
use cuentas_backend::error::AppError;
use cuentas_backend::models::CreateOrderRequest;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

use common::{order_service, seed_account, seed_client, setup_db};

fn new_order_request(platform: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        platform: platform.to_string(),
        payment_reference: Some("YAPE-0001".to_string()),
    }
}

async fn order_status(pool: &DatabaseConnection, order_id: i64) -> OrderStatus {
    orders::Entity::find_by_id(order_id)
        .one(pool)
        .await
        .unwrap()
        .unwrap()
        .status
}

async fn account_status(pool: &DatabaseConnection, account_id: i64) -> AccountStatus {
    accounts::Entity::find_by_id(account_id)
        .one(pool)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
async fn create_order_starts_pending_with_no_account() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.starts_at.is_none());
    assert!(order.expires_at.is_none());

    let stored = orders::Entity::find_by_id(order.id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.account_id, None);
}

#[tokio::test]
async fn create_order_rejects_unknown_platform() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;

    let err = service
        .create_order(client_id, new_order_request("Spotify"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service
        .create_order(client_id, new_order_request("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn happy_path_pending_paid_fulfilled() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let account_id = seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    let paid = service.mark_paid(order.id).await.unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);

    let fulfilled = service.assign_account(order.id, None).await.unwrap();
    assert_eq!(fulfilled.status, OrderStatus::Fulfilled);
    assert!(fulfilled.starts_at.is_some());
    assert!(fulfilled.expires_at.is_some());

    assert_eq!(account_status(&pool, account_id).await, AccountStatus::Assigned);

    let stored = orders::Entity::find_by_id(order.id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.account_id, Some(account_id));
}

#[tokio::test]
async fn expiry_is_fulfillment_time_plus_subscription_days() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    let fulfilled = service.assign_account(order.id, None).await.unwrap();

    let starts_at = fulfilled.starts_at.unwrap();
    let expires_at = fulfilled.expires_at.unwrap();
    assert_eq!(expires_at - starts_at, Duration::days(30));
}

#[tokio::test]
async fn expiry_honors_configured_duration() {
    let pool = setup_db().await;
    let service = order_service(&pool, 7);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    let fulfilled = service.assign_account(order.id, None).await.unwrap();

    assert_eq!(
        fulfilled.expires_at.unwrap() - fulfilled.starts_at.unwrap(),
        Duration::days(7)
    );
}

#[tokio::test]
async fn assignment_prefers_earliest_loaded_account() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let first = seed_account(&pool, "Netflix", "n1@stock.test").await;
    let second = seed_account(&pool, "Netflix", "n2@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.assign_account(order.id, None).await.unwrap();

    assert_eq!(account_status(&pool, first).await, AccountStatus::Assigned);
    assert_eq!(account_status(&pool, second).await, AccountStatus::Available);
}

#[tokio::test]
async fn admin_can_pick_a_specific_account() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let first = seed_account(&pool, "Netflix", "n1@stock.test").await;
    let second = seed_account(&pool, "Netflix", "n2@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.assign_account(order.id, Some(second)).await.unwrap();

    assert_eq!(account_status(&pool, first).await, AccountStatus::Available);
    assert_eq!(account_status(&pool, second).await, AccountStatus::Assigned);
}

#[tokio::test]
async fn picked_account_must_match_platform() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    let disney = seed_account(&pool, "Disney+", "d1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    let err = service
        .assign_account(order.id, Some(disney))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    assert_eq!(order_status(&pool, order.id).await, OrderStatus::Pending);
}

#[tokio::test]
async fn an_account_is_never_assigned_twice() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let only = seed_account(&pool, "Netflix", "n1@stock.test").await;

    let first_order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    let second_order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    service.assign_account(first_order.id, None).await.unwrap();

    let err = service
        .assign_account(second_order.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoInventory(_)));

    // Explicitly asking for the taken row fails the same way
    let err = service
        .assign_account(second_order.id, Some(only))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoInventory(_)));

    assert_eq!(
        order_status(&pool, second_order.id).await,
        OrderStatus::Pending
    );
}

#[tokio::test]
async fn two_orders_get_distinct_accounts() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Netflix", "n2@stock.test").await;

    let first_order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    let second_order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    service.assign_account(first_order.id, None).await.unwrap();
    service.assign_account(second_order.id, None).await.unwrap();

    let first = orders::Entity::find_by_id(first_order.id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();
    let second = orders::Entity::find_by_id(second_order.id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(first.account_id, second.account_id);
}

#[tokio::test]
async fn no_stock_leaves_order_pending_until_restock() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;

    // The platform exists as a category but its only row is already taken
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    let blocker = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.assign_account(blocker.id, None).await.unwrap();

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    let err = service.assign_account(order.id, None).await.unwrap_err();
    assert!(matches!(err, AppError::NoInventory(_)));
    assert_eq!(order_status(&pool, order.id).await, OrderStatus::Pending);

    // Restock and the same order fulfills
    let restocked = seed_account(&pool, "Netflix", "n2@stock.test").await;
    let fulfilled = service.assign_account(order.id, None).await.unwrap();

    assert_eq!(fulfilled.status, OrderStatus::Fulfilled);
    assert_eq!(
        account_status(&pool, restocked).await,
        AccountStatus::Assigned
    );
}

#[tokio::test]
async fn terminal_orders_reject_every_transition() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Netflix", "n2@stock.test").await;

    let fulfilled = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.assign_account(fulfilled.id, None).await.unwrap();

    let cancelled = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.cancel_order(cancelled.id).await.unwrap();

    for terminal in [fulfilled.id, cancelled.id] {
        assert!(matches!(
            service.mark_paid(terminal).await.unwrap_err(),
            AppError::InvalidState(_)
        ));
        assert!(matches!(
            service.assign_account(terminal, None).await.unwrap_err(),
            AppError::InvalidState(_)
        ));
        assert!(matches!(
            service.cancel_order(terminal).await.unwrap_err(),
            AppError::InvalidState(_)
        ));
    }
}

#[tokio::test]
async fn mark_paid_requires_pending() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.mark_paid(order.id).await.unwrap();

    let err = service.mark_paid(order.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(order_status(&pool, order.id).await, OrderStatus::Paid);
}

#[tokio::test]
async fn paid_orders_can_be_fulfilled_or_cancelled() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Netflix", "n2@stock.test").await;

    let to_fulfill = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.mark_paid(to_fulfill.id).await.unwrap();
    let fulfilled = service.assign_account(to_fulfill.id, None).await.unwrap();
    assert_eq!(fulfilled.status, OrderStatus::Fulfilled);

    let to_cancel = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.mark_paid(to_cancel.id).await.unwrap();
    let cancelled = service.cancel_order(to_cancel.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn cancelling_pending_order_leaves_inventory_untouched() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let account_id = seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    let cancelled = service.cancel_order(order.id).await.unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        account_status(&pool, account_id).await,
        AccountStatus::Available
    );
}

#[tokio::test]
async fn cancelling_order_holding_stock_releases_it() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let account_id = seed_account(&pool, "Netflix", "n1@stock.test").await;

    let order = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.mark_paid(order.id).await.unwrap();

    // Force the defensive shape: a paid order already holding a reserved row
    let account = accounts::Entity::find_by_id(account_id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();
    let mut am = account.into_active_model();
    am.status = Set(AccountStatus::Assigned);
    am.update(&pool).await.unwrap();

    let stored = orders::Entity::find_by_id(order.id)
        .one(&pool)
        .await
        .unwrap()
        .unwrap();
    let mut am = stored.into_active_model();
    am.account_id = Set(Some(account_id));
    am.update(&pool).await.unwrap();

    let cancelled = service.cancel_order(order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        account_status(&pool, account_id).await,
        AccountStatus::Available
    );

    // The released row is claimable again
    let next = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    let fulfilled = service.assign_account(next.id, None).await.unwrap();
    assert_eq!(fulfilled.status, OrderStatus::Fulfilled);
}

#[tokio::test]
async fn my_accounts_lists_delivered_credentials() {
    let pool = setup_db().await;
    let service = order_service(&pool, 30);
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    let other_client = seed_client(&pool, "912345678", "Jose").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Disney+", "d1@stock.test").await;

    let netflix = service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    service.assign_account(netflix.id, None).await.unwrap();

    // Someone else's order must not leak into the listing
    let other = service
        .create_order(other_client, new_order_request("Disney+"))
        .await
        .unwrap();
    service.assign_account(other.id, None).await.unwrap();

    // A pending order has nothing delivered yet
    service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();

    let delivered = service.my_accounts(client_id).await.unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].platform, "Netflix");
    assert_eq!(delivered[0].email, "n1@stock.test");
    assert!(delivered[0].active);
}

#[tokio::test]
async fn expirations_view_shows_orders_ending_soon() {
    let pool = setup_db().await;
    let client_id = seed_client(&pool, "987654321", "Maria").await;
    seed_account(&pool, "Netflix", "n1@stock.test").await;
    seed_account(&pool, "Disney+", "d1@stock.test").await;

    // Two-day subscription: inside the default three-day window
    let short_service = order_service(&pool, 2);
    let ending = short_service
        .create_order(client_id, new_order_request("Netflix"))
        .await
        .unwrap();
    short_service.assign_account(ending.id, None).await.unwrap();

    // Thirty-day subscription: outside the window
    let long_service = order_service(&pool, 30);
    let fresh = long_service
        .create_order(client_id, new_order_request("Disney+"))
        .await
        .unwrap();
    long_service.assign_account(fresh.id, None).await.unwrap();

    let expiring = long_service.expiring_orders(None).await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].order_id, ending.id);
    assert!(expiring[0].client.is_some());
    assert!(expiring[0].days_left <= 2);
}
