use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{AccountStatus, OrderStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::admin_login,
        handlers::auth::client_login,
        handlers::storefront::get_catalog,
        handlers::storefront::get_payment_info,
        handlers::order::create_order,
        handlers::order::get_orders,
        handlers::order::get_my_accounts,
        handlers::admin::list_orders,
        handlers::admin::get_order_detail,
        handlers::admin::mark_order_paid,
        handlers::admin::assign_account,
        handlers::admin::cancel_order,
        handlers::admin::list_expirations,
        handlers::admin::list_accounts,
        handlers::admin::add_account,
        handlers::admin::add_accounts_bulk,
        handlers::admin::update_account,
    ),
    components(
        schemas(
            AdminLoginRequest,
            ClientLoginRequest,
            AdminAuthResponse,
            ClientAuthResponse,
            ClientResponse,
            CatalogResponse,
            PaymentInfoResponse,
            CreateOrderRequest,
            AssignAccountRequest,
            OrderResponse,
            AdminOrderResponse,
            OrderDetailResponse,
            DeliveredAccountResponse,
            ExpiringOrderResponse,
            OrderStatus,
            CreateAccountRequest,
            BulkCreateAccountsRequest,
            UpdateAccountRequest,
            AccountResponse,
            AccountStatus,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "storefront", description = "Public storefront API"),
        (name = "order", description = "Customer order API"),
        (name = "admin", description = "Admin panel API"),
    ),
    info(
        title = "Cuentas Backend API",
        version = "1.0.0",
        description = "Streaming account storefront REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
