use crate::entities::{AccountStatus, account_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub platform: String,
    pub email: String,
    pub password: String,
    pub profile: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkCreateAccountsRequest {
    pub accounts: Vec<CreateAccountRequest>,
}

/// Admin edit of a stock row. Status is not editable here: availability only
/// changes through assignment and cancellation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub platform: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub platform: String,
    pub email: String,
    pub password: String,
    pub profile: Option<String>,
    pub notes: Option<String>,
    pub status: AccountStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<account_entity::Model> for AccountResponse {
    fn from(m: account_entity::Model) -> Self {
        Self {
            id: m.id,
            platform: m.platform,
            email: m.email,
            password: m.password,
            profile: m.profile,
            notes: m.notes,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AccountQuery {
    pub platform: Option<String>,
    pub status: Option<AccountStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
