use crate::entities::{OrderStatus, account_entity, client_entity, order_entity};
use crate::models::{AccountResponse, ClientResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub platform: String,
    /// Transfer or Yape operation number the customer paid with.
    pub payment_reference: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignAccountRequest {
    /// Explicit stock row to deliver; defaults to the oldest available one.
    pub account_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub platform: String,
    pub status: OrderStatus,
    pub payment_reference: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            platform: m.platform,
            status: m.status,
            payment_reference: m.payment_reference,
            starts_at: m.starts_at,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }
    }
}

/// Order row as the admin panel sees it, with the purchasing client attached.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOrderResponse {
    pub id: i64,
    pub platform: String,
    pub status: OrderStatus,
    pub payment_reference: Option<String>,
    pub account_id: Option<i64>,
    pub client: Option<ClientResponse>,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl AdminOrderResponse {
    pub fn from_joined(order: order_entity::Model, client: Option<client_entity::Model>) -> Self {
        Self {
            id: order.id,
            platform: order.platform,
            status: order.status,
            payment_reference: order.payment_reference,
            account_id: order.account_id,
            client: client.map(ClientResponse::from),
            starts_at: order.starts_at,
            expires_at: order.expires_at,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub order: AdminOrderResponse,
    /// Stock the admin can deliver for this order's platform.
    pub available_accounts: Vec<AccountResponse>,
}

/// A delivered credential as shown on the customer's "my accounts" page.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveredAccountResponse {
    pub order_id: i64,
    pub platform: String,
    pub email: String,
    pub password: String,
    pub profile: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl DeliveredAccountResponse {
    pub fn from_joined(order: order_entity::Model, account: account_entity::Model) -> Self {
        let active = order.is_active();
        Self {
            order_id: order.id,
            platform: order.platform,
            email: account.email,
            password: account.password,
            profile: account.profile,
            starts_at: order.starts_at,
            expires_at: order.expires_at,
            active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpiringOrderResponse {
    pub order_id: i64,
    pub platform: String,
    pub client: Option<ClientResponse>,
    pub expires_at: Option<DateTime<Utc>>,
    pub days_left: i64,
}

impl ExpiringOrderResponse {
    pub fn from_joined(order: order_entity::Model, client: Option<client_entity::Model>) -> Self {
        let days_left = order
            .expires_at
            .map(|end| (end - Utc::now()).num_days())
            .unwrap_or(0);
        Self {
            order_id: order.id,
            platform: order.platform,
            client: client.map(ClientResponse::from),
            expires_at: order.expires_at,
            days_left,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpirationsQuery {
    /// Look-ahead window in days; defaults to 3.
    pub days: Option<i64>,
}
