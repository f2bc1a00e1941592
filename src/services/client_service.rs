use crate::entities::client_entity as clients;
use crate::error::{AppError, AppResult};
use crate::utils::{format_pe_phone, validate_pe_phone};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct ClientService {
    pool: DatabaseConnection,
}

impl ClientService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Find a client by phone, creating the row on first contact.
    /// The name is mandatory only when the client does not exist yet.
    pub async fn identify(&self, phone: &str, name: Option<&str>) -> AppResult<clients::Model> {
        let phone = format_pe_phone(phone.trim());
        validate_pe_phone(&phone)?;

        if let Some(existing) = clients::Entity::find()
            .filter(clients::Column::Phone.eq(phone.as_str()))
            .one(&self.pool)
            .await?
        {
            return Ok(existing);
        }

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                AppError::ValidationError("Name is required for new clients".to_string())
            })?;

        let created = clients::ActiveModel {
            phone: Set(phone),
            name: Set(name.to_string()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("New client registered: {}", created.phone);
        Ok(created)
    }

    pub async fn get(&self, client_id: i64) -> AppResult<clients::Model> {
        clients::Entity::find_by_id(client_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {client_id} not found")))
    }
}
