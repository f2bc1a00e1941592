mod common;

use cuentas_backend::error::AppError;
use cuentas_backend::services::ClientService;

use common::setup_db;

#[tokio::test]
async fn identify_creates_then_finds_the_same_client() {
    let pool = setup_db().await;
    let service = ClientService::new(pool.clone());

    let created = service.identify("987654321", Some("Maria")).await.unwrap();
    assert_eq!(created.phone, "+51987654321");
    assert_eq!(created.name, "Maria");

    // Same number in a different shape resolves to the same row, name ignored
    let found = service
        .identify("+51 987 654 321", Some("Other Name"))
        .await
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Maria");

    // Returning clients need no name at all
    let found = service.identify("987654321", None).await.unwrap();
    assert_eq!(found.id, created.id);
}

#[tokio::test]
async fn new_clients_must_give_a_name() {
    let pool = setup_db().await;
    let service = ClientService::new(pool.clone());

    let err = service.identify("987654321", None).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service.identify("987654321", Some("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn malformed_phones_are_rejected() {
    let pool = setup_db().await;
    let service = ClientService::new(pool.clone());

    for phone in ["12345", "887654321", "+1555123456", ""] {
        let err = service.identify(phone, Some("Maria")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)), "{phone}");
    }
}

#[tokio::test]
async fn get_missing_client_is_not_found() {
    let pool = setup_db().await;
    let service = ClientService::new(pool.clone());

    let err = service.get(42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
