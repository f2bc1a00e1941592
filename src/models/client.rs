use crate::entities::client_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    pub id: i64,
    pub phone: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<client_entity::Model> for ClientResponse {
    fn from(m: client_entity::Model) -> Self {
        Self {
            id: m.id,
            phone: m.phone,
            name: m.name,
            created_at: m.created_at,
        }
    }
}
