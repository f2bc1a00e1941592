use cuentas_backend::config::SmtpConfig;
use cuentas_backend::external::Mailer;
use cuentas_backend::models::CreateAccountRequest;
use cuentas_backend::services::{ClientService, InventoryService, OrderService};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every query on the same in-memory instance.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let pool = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&pool, None).await.expect("apply migrations");
    pool
}

/// Order service with an unconfigured mailer (notifications log only).
pub fn order_service(pool: &DatabaseConnection, subscription_days: i64) -> OrderService {
    OrderService::new(
        pool.clone(),
        subscription_days,
        Mailer::new(SmtpConfig::default(), None),
    )
}

pub async fn seed_client(pool: &DatabaseConnection, phone: &str, name: &str) -> i64 {
    ClientService::new(pool.clone())
        .identify(phone, Some(name))
        .await
        .expect("create client")
        .id
}

pub async fn seed_account(pool: &DatabaseConnection, platform: &str, email: &str) -> i64 {
    InventoryService::new(pool.clone())
        .add_account(CreateAccountRequest {
            platform: platform.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            profile: None,
            notes: None,
        })
        .await
        .expect("load account")
        .id
}
