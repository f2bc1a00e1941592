use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/auth/admin/login",
    tag = "auth",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin authenticated", body = AdminAuthResponse),
        (status = 401, description = "Incorrect password")
    )
)]
pub async fn admin_login(
    auth_service: web::Data<AuthService>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.admin_login(&request.password).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/client/login",
    tag = "auth",
    request_body = ClientLoginRequest,
    responses(
        (status = 200, description = "Client identified", body = ClientAuthResponse),
        (status = 400, description = "Invalid phone or missing name")
    )
)]
pub async fn client_login(
    auth_service: web::Data<AuthService>,
    request: web::Json<ClientLoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.client_login(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/admin/login", web::post().to(admin_login))
            .route("/client/login", web::post().to(client_login)),
    );
}
