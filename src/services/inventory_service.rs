use crate::entities::{AccountStatus, account_entity as accounts};
use crate::error::{AppError, AppResult};
use crate::models::{
    AccountQuery, AccountResponse, CreateAccountRequest, PaginatedResponse, PaginationParams,
    UpdateAccountRequest,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct InventoryService {
    pool: DatabaseConnection,
}

impl InventoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn add_account(&self, request: CreateAccountRequest) -> AppResult<AccountResponse> {
        validate_new_account(&request)?;

        let created = new_active_model(request).insert(&self.pool).await?;

        log::info!(
            "Account #{} loaded into stock for {}",
            created.id,
            created.platform
        );
        Ok(created.into())
    }

    /// Bulk load. All rows are inserted in one transaction so a bad row in the
    /// middle of the batch does not leave a partial load behind.
    pub async fn add_accounts(
        &self,
        requests: Vec<CreateAccountRequest>,
    ) -> AppResult<Vec<AccountResponse>> {
        if requests.is_empty() {
            return Err(AppError::ValidationError(
                "At least one account is required".to_string(),
            ));
        }
        for request in &requests {
            validate_new_account(request)?;
        }

        let txn = self.pool.begin().await?;
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            let model = new_active_model(request).insert(&txn).await?;
            created.push(model);
        }
        txn.commit().await?;

        log::info!("Bulk-loaded {} accounts into stock", created.len());
        Ok(created.into_iter().map(Into::into).collect())
    }

    pub async fn update_account(
        &self,
        account_id: i64,
        request: UpdateAccountRequest,
    ) -> AppResult<AccountResponse> {
        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))?;

        let mut am = account.into_active_model();
        if let Some(platform) = non_empty(request.platform) {
            am.platform = Set(platform);
        }
        if let Some(email) = non_empty(request.email) {
            am.email = Set(email);
        }
        if let Some(password) = non_empty(request.password) {
            am.password = Set(password);
        }
        if let Some(profile) = request.profile {
            am.profile = Set(Some(profile).filter(|p| !p.trim().is_empty()));
        }
        if let Some(notes) = request.notes {
            am.notes = Set(Some(notes).filter(|n| !n.trim().is_empty()));
        }
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn list_accounts(
        &self,
        query: &AccountQuery,
    ) -> AppResult<PaginatedResponse<AccountResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = accounts::Entity::find();
        if let Some(platform) = &query.platform {
            base = base.filter(accounts::Column::Platform.eq(platform.as_str()));
        }
        if let Some(status) = &query.status {
            base = base.filter(accounts::Column::Status.eq(status.clone()));
        }

        let total = base.clone().count(&self.pool).await? as i64;

        let items = base
            .order_by_asc(accounts::Column::Platform)
            .order_by_asc(accounts::Column::Status)
            .order_by_asc(accounts::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    /// Distinct platforms with stock to sell; the public catalog.
    pub async fn available_platforms(&self) -> AppResult<Vec<String>> {
        let platforms: Vec<String> = accounts::Entity::find()
            .select_only()
            .column(accounts::Column::Platform)
            .filter(accounts::Column::Status.eq(AccountStatus::Available))
            .distinct()
            .order_by_asc(accounts::Column::Platform)
            .into_tuple()
            .all(&self.pool)
            .await?;

        Ok(platforms)
    }

    /// Whether any stock row (assigned or not) exists for the platform.
    pub async fn platform_exists(&self, platform: &str) -> AppResult<bool> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Platform.eq(platform))
            .count(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

fn validate_new_account(request: &CreateAccountRequest) -> AppResult<()> {
    if request.platform.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.trim().is_empty()
    {
        return Err(AppError::ValidationError(
            "Platform, email and password are required".to_string(),
        ));
    }
    Ok(())
}

fn new_active_model(request: CreateAccountRequest) -> accounts::ActiveModel {
    accounts::ActiveModel {
        platform: Set(request.platform.trim().to_string()),
        email: Set(request.email.trim().to_string()),
        password: Set(request.password),
        profile: Set(request.profile.filter(|p| !p.trim().is_empty())),
        notes: Set(request.notes.filter(|n| !n.trim().is_empty())),
        status: Set(AccountStatus::Available),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
