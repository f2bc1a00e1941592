use crate::error::AppError;
use crate::middlewares::Identity;
use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_client_id_from_request(req: &HttpRequest) -> Option<i64> {
    match req.extensions().get::<Identity>() {
        Some(Identity::Client(id)) => Some(*id),
        _ => None,
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order registered", body = OrderResponse),
        (status = 400, description = "Missing or unknown platform"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let Some(client_id) = get_client_id_from_request(&req) else {
        return Ok(AppError::AuthError("Client token required".to_string()).error_response());
    };

    match order_service
        .create_order(client_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Recibimos tu pedido, lo verificaremos en breve"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The client's order history"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(client_id) = get_client_id_from_request(&req) else {
        return Ok(AppError::AuthError("Client token required".to_string()).error_response());
    };

    match order_service.client_orders(client_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/mine",
    tag = "order",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Credentials delivered to the client"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_my_accounts(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(client_id) = get_client_id_from_request(&req) else {
        return Ok(AppError::AuthError("Client token required".to_string()).error_response());
    };

    match order_service.my_accounts(client_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(get_orders))
            .route("/mine", web::get().to(get_my_accounts)),
    );
}
