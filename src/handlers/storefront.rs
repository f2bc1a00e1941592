use crate::config::StoreConfig;
use crate::models::*;
use crate::services::InventoryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/storefront/catalog",
    tag = "storefront",
    responses(
        (status = 200, description = "Platforms currently in stock", body = CatalogResponse)
    )
)]
pub async fn get_catalog(inventory_service: web::Data<InventoryService>) -> Result<HttpResponse> {
    match inventory_service.available_platforms().await {
        Ok(platforms) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": CatalogResponse { platforms }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/storefront/payment-info",
    tag = "storefront",
    responses(
        (status = 200, description = "Manual payment instructions", body = PaymentInfoResponse)
    )
)]
pub async fn get_payment_info(store: web::Data<StoreConfig>) -> Result<HttpResponse> {
    let response = PaymentInfoResponse {
        qr_url: store.payment_qr_url.clone(),
        instructions: store.payment_instructions.clone(),
        accounts: store
            .payment_accounts
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
        support_whatsapp: store.support_whatsapp.clone(),
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": response
    })))
}

pub fn storefront_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/storefront")
            .route("/catalog", web::get().to(get_catalog))
            .route("/payment-info", web::get().to(get_payment_info)),
    );
}
