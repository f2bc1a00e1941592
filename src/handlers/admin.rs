use crate::models::*;
use crate::services::{InventoryService, OrderService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "Filter by order status"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Orders with their clients"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin token required")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/orders/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order detail with assignable stock", body = OrderDetailResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order_detail(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.get_order_detail(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/paid",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Payment confirmed", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not pending")
    )
)]
pub async fn mark_order_paid(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.mark_paid(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Pago confirmado"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/assign",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    request_body = AssignAccountRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order fulfilled", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "No stock available or order already closed")
    )
)]
pub async fn assign_account(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
    request: web::Json<AssignAccountRequest>,
) -> Result<HttpResponse> {
    match order_service
        .assign_account(path.into_inner(), request.account_id)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Cuenta asignada correctamente"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/cancel",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order cancelled", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already closed")
    )
)]
pub async fn cancel_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.cancel_order(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Pedido cancelado"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/expirations",
    tag = "admin",
    params(
        ("days" = Option<i64>, Query, description = "Look-ahead window in days (default 3)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Subscriptions ending soon")
    )
)]
pub async fn list_expirations(
    order_service: web::Data<OrderService>,
    query: web::Query<ExpirationsQuery>,
) -> Result<HttpResponse> {
    match order_service.expiring_orders(query.days).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/accounts",
    tag = "admin",
    params(
        ("platform" = Option<String>, Query, description = "Filter by platform"),
        ("status" = Option<String>, Query, description = "Filter by stock status"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stock listing")
    )
)]
pub async fn list_accounts(
    inventory_service: web::Data<InventoryService>,
    query: web::Query<AccountQuery>,
) -> Result<HttpResponse> {
    match inventory_service.list_accounts(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/accounts",
    tag = "admin",
    request_body = CreateAccountRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account loaded into stock", body = AccountResponse),
        (status = 400, description = "Missing mandatory fields")
    )
)]
pub async fn add_account(
    inventory_service: web::Data<InventoryService>,
    request: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse> {
    match inventory_service.add_account(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Cuenta agregada al almacén"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/accounts/bulk",
    tag = "admin",
    request_body = BulkCreateAccountsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Batch loaded into stock"),
        (status = 400, description = "A row is missing mandatory fields")
    )
)]
pub async fn add_accounts_bulk(
    inventory_service: web::Data<InventoryService>,
    request: web::Json<BulkCreateAccountsRequest>,
) -> Result<HttpResponse> {
    match inventory_service
        .add_accounts(request.into_inner().accounts)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "loaded": response.len(),
                "accounts": response
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/accounts/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Account id")
    ),
    request_body = UpdateAccountRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_account(
    inventory_service: web::Data<InventoryService>,
    path: web::Path<i64>,
    request: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse> {
    match inventory_service
        .update_account(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Cambios guardados"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/orders", web::get().to(list_orders))
            .route("/orders/{id}", web::get().to(get_order_detail))
            .route("/orders/{id}/paid", web::post().to(mark_order_paid))
            .route("/orders/{id}/assign", web::post().to(assign_account))
            .route("/orders/{id}/cancel", web::post().to(cancel_order))
            .route("/expirations", web::get().to(list_expirations))
            .route("/accounts", web::get().to(list_accounts))
            .route("/accounts", web::post().to(add_account))
            .route("/accounts/bulk", web::post().to(add_accounts_bulk))
            .route("/accounts/{id}", web::put().to(update_account)),
    );
}
