use crate::entities::{
    AccountStatus, OrderStatus, account_entity as accounts, client_entity as clients,
    order_entity as orders,
};
use crate::error::{AppError, AppResult};
use crate::external::Mailer;
use crate::models::{
    AdminOrderResponse, CreateOrderRequest, DeliveredAccountResponse, ExpiringOrderResponse,
    OrderDetailResponse, OrderQuery, OrderResponse, PaginatedResponse, PaginationParams,
};
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, UpdateResult,
    Value,
};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
    subscription_days: i64,
    mailer: Mailer,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection, subscription_days: i64, mailer: Mailer) -> Self {
        Self {
            pool,
            subscription_days,
            mailer,
        }
    }

    /// Register a customer's request for a platform. The order starts out
    /// `pending` with no stock attached; the admin is notified best-effort.
    pub async fn create_order(
        &self,
        client_id: i64,
        request: CreateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let platform = request.platform.trim().to_string();
        if platform.is_empty() {
            return Err(AppError::ValidationError(
                "Platform is required".to_string(),
            ));
        }

        let client = clients::Entity::find_by_id(client_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {client_id} not found")))?;

        // The requested platform must exist as a stock category, even if
        // everything is currently assigned; fulfillment waits for restock.
        let known = accounts::Entity::find()
            .filter(accounts::Column::Platform.eq(platform.as_str()))
            .count(&self.pool)
            .await?;
        if known == 0 {
            return Err(AppError::ValidationError(format!(
                "Unknown platform: {platform}"
            )));
        }

        let order = orders::ActiveModel {
            client_id: Set(client.id),
            platform: Set(platform),
            payment_reference: Set(request
                .payment_reference
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())),
            status: Set(OrderStatus::Pending),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Order #{} created for {} by client #{}",
            order.id,
            order.platform,
            client.id
        );
        self.mailer.notify_new_order(&order, &client);

        Ok(order.into())
    }

    /// Admin confirmed the manual payment: `pending` -> `paid`.
    pub async fn mark_paid(&self, order_id: i64) -> AppResult<OrderResponse> {
        let order = self.find_order(order_id).await?;

        if order.status != OrderStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Cannot mark a {} order as paid",
                order.status
            )));
        }

        let mut am = order.into_active_model();
        am.status = Set(OrderStatus::Paid);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(updated.into())
    }

    /// Fulfill an order by handing it a stock row of its platform.
    ///
    /// Without an explicit `account_id` the oldest available row wins, so
    /// inventory ages out predictably. The flip to `assigned` is a guarded
    /// update inside the transaction: zero rows affected means a concurrent
    /// assignment claimed that row first and the next candidate is tried.
    pub async fn assign_account(
        &self,
        order_id: i64,
        account_id: Option<i64>,
    ) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

        if !matches!(order.status, OrderStatus::Pending | OrderStatus::Paid) {
            return Err(AppError::InvalidState(format!(
                "Cannot fulfill a {} order",
                order.status
            )));
        }

        let candidates: Vec<accounts::Model> = match account_id {
            Some(id) => {
                let account = accounts::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))?;
                if account.platform != order.platform {
                    return Err(AppError::ValidationError(format!(
                        "Account {} is {} stock, order wants {}",
                        id, account.platform, order.platform
                    )));
                }
                if account.status != AccountStatus::Available {
                    return Err(AppError::NoInventory(format!(
                        "Account {id} is no longer available"
                    )));
                }
                vec![account]
            }
            None => {
                accounts::Entity::find()
                    .filter(accounts::Column::Platform.eq(order.platform.as_str()))
                    .filter(accounts::Column::Status.eq(AccountStatus::Available))
                    .order_by_asc(accounts::Column::Id)
                    .all(&txn)
                    .await?
            }
        };

        if candidates.is_empty() {
            return Err(AppError::NoInventory(format!(
                "No available accounts for {}",
                order.platform
            )));
        }

        let mut claimed: Option<accounts::Model> = None;
        for candidate in candidates {
            let result: UpdateResult = accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Status,
                    Expr::value(Into::<Value>::into(AccountStatus::Assigned)),
                )
                .col_expr(
                    accounts::Column::UpdatedAt,
                    Expr::value(Value::from(Utc::now())),
                )
                .filter(accounts::Column::Id.eq(candidate.id))
                .filter(accounts::Column::Status.eq(AccountStatus::Available))
                .exec(&txn)
                .await?;

            if result.rows_affected == 1 {
                claimed = Some(candidate);
                break;
            }
        }

        let Some(account) = claimed else {
            return Err(AppError::NoInventory(format!(
                "No available accounts for {}",
                order.platform
            )));
        };

        let starts_at = Utc::now();
        let expires_at = starts_at + Duration::days(self.subscription_days);

        let mut am = order.into_active_model();
        am.status = Set(OrderStatus::Fulfilled);
        am.account_id = Set(Some(account.id));
        am.starts_at = Set(Some(starts_at));
        am.expires_at = Set(Some(expires_at));
        am.updated_at = Set(Some(starts_at));
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Order #{} fulfilled with account #{}, expires {}",
            updated.id,
            account.id,
            expires_at
        );
        Ok(updated.into())
    }

    /// Cancel a not-yet-fulfilled order, releasing any held stock row.
    pub async fn cancel_order(&self, order_id: i64) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

        if order.status.is_terminal() {
            return Err(AppError::InvalidState(format!(
                "Cannot cancel a {} order",
                order.status
            )));
        }

        if let Some(account_id) = order.account_id {
            accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Status,
                    Expr::value(Into::<Value>::into(AccountStatus::Available)),
                )
                .col_expr(
                    accounts::Column::UpdatedAt,
                    Expr::value(Value::from(Utc::now())),
                )
                .filter(accounts::Column::Id.eq(account_id))
                .exec(&txn)
                .await?;
            log::info!("Account #{account_id} released back to stock");
        }

        let mut am = order.into_active_model();
        am.status = Set(OrderStatus::Cancelled);
        am.account_id = Set(None);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        Ok(updated.into())
    }

    pub async fn list_orders(
        &self,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<AdminOrderResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = orders::Entity::find();
        if let Some(status) = &query.status {
            base = base.filter(orders::Column::Status.eq(status.clone()));
        }

        let total = base.clone().count(&self.pool).await? as i64;

        let rows = base
            .find_also_related(clients::Entity)
            .order_by_asc(orders::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(|(order, client)| AdminOrderResponse::from_joined(order, client))
            .collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    /// Admin review view: the order, its client, and the stock it could get.
    pub async fn get_order_detail(&self, order_id: i64) -> AppResult<OrderDetailResponse> {
        let (order, client) = orders::Entity::find_by_id(order_id)
            .find_also_related(clients::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

        let available_accounts = accounts::Entity::find()
            .filter(accounts::Column::Platform.eq(order.platform.as_str()))
            .filter(accounts::Column::Status.eq(AccountStatus::Available))
            .order_by_asc(accounts::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(OrderDetailResponse {
            order: AdminOrderResponse::from_joined(order, client),
            available_accounts: available_accounts.into_iter().map(Into::into).collect(),
        })
    }

    /// The credentials delivered to a client, most recent expiry first.
    pub async fn my_accounts(&self, client_id: i64) -> AppResult<Vec<DeliveredAccountResponse>> {
        let rows = orders::Entity::find()
            .filter(orders::Column::ClientId.eq(client_id))
            .filter(orders::Column::Status.eq(OrderStatus::Fulfilled))
            .find_also_related(accounts::Entity)
            .order_by_desc(orders::Column::ExpiresAt)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(order, account)| {
                account.map(|a| DeliveredAccountResponse::from_joined(order, a))
            })
            .collect())
    }

    /// The client's full order history, newest first.
    pub async fn client_orders(&self, client_id: i64) -> AppResult<Vec<OrderResponse>> {
        let rows = orders::Entity::find()
            .filter(orders::Column::ClientId.eq(client_id))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fulfilled orders whose subscription ends within the next `days` days
    /// (including already-expired ones), soonest first.
    pub async fn expiring_orders(
        &self,
        days: Option<i64>,
    ) -> AppResult<Vec<ExpiringOrderResponse>> {
        let days = days.unwrap_or(3).max(0);
        let limit = Utc::now() + Duration::days(days);

        let rows = orders::Entity::find()
            .filter(orders::Column::Status.eq(OrderStatus::Fulfilled))
            .filter(orders::Column::ExpiresAt.is_not_null())
            .filter(orders::Column::ExpiresAt.lte(limit))
            .find_also_related(clients::Entity)
            .order_by_asc(orders::Column::ExpiresAt)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(order, client)| ExpiringOrderResponse::from_joined(order, client))
            .collect())
    }

    async fn find_order(&self, order_id: i64) -> AppResult<orders::Model> {
        orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))
    }
}
