use axum::{extract::{Path, State}, Extension, Json};
use axum::http::{HeaderMap, StatusCode};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::order::{ConfirmPaymentRequest, OrderItemResponse, OrderResponse};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::models::order::Order;
use crate::state::AppState;

pub async fn list_orders(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let orders = sqlx::query_as::<_, Order>(
        r#"SELECT id, store_id, is_paid, phone, address, created_at, updated_at
        FROM orders
        WHERE store_id = $1
        ORDER BY created_at DESC"#,
    )
    .bind(store_id)
    .fetch_all(&db_pool)
    .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut items = load_items(&db_pool, &order_ids).await?;

    Ok(Json(
        orders
            .into_iter()
            .map(|order| {
                let order_items = items.remove(&order.id).unwrap_or_default();
                build_order_response(order, order_items)
            })
            .collect(),
    ))
}

pub async fn get_order(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, order_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OrderResponse>, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    fetch_order_by_id(&db_pool, store_id, order_id).await.map(Json)
}

pub async fn delete_order(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, order_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    // Order items go with the order
    let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND store_id = $2")
        .bind(order_id)
        .bind(store_id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Order not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// Webhook retries are routine. The guard in the WHERE clause makes the flip
// first-wins: a duplicate callback updates zero rows.
const MARK_PAID_SQL: &str = r#"UPDATE orders SET
        is_paid = TRUE,
        phone = COALESCE($2, phone),
        address = COALESCE($3, address),
        updated_at = NOW()
    WHERE id = $1 AND is_paid = FALSE"#;

// PATCH /{storeId}/orders/{orderId}/payment - Payment provider callback.
// Authenticated by a shared secret header instead of a user token; the
// provider has no JWT.
pub async fn confirm_payment(
    State(AppState { db_pool }): State<AppState>,
    Path((store_id, order_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let expected = std::env::var("WEBHOOK_SECRET")
        .map_err(|_| AppError::internal("WEBHOOK_SECRET is not set"))?;

    let provided = headers
        .get("x-webhook-secret")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if provided != expected {
        return Err(AppError::Unauthorized);
    }

    let order = sqlx::query_as::<_, Order>(
        r#"SELECT id, store_id, is_paid, phone, address, created_at, updated_at
        FROM orders
        WHERE id = $1 AND store_id = $2"#,
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Order not found"))?;

    if order.is_paid {
        return Err(AppError::conflict("Order is already paid"));
    }

    let result = sqlx::query(MARK_PAID_SQL)
        .bind(order_id)
        .bind(req.phone.as_deref())
        .bind(req.address.as_deref())
        .execute(&db_pool)
        .await?;

    // A concurrent callback got here between the read above and the update
    if result.rows_affected() == 0 {
        return Err(AppError::conflict("Order is already paid"));
    }

    tracing::info!(%order_id, %store_id, "Order marked paid");

    fetch_order_by_id(&db_pool, store_id, order_id).await.map(Json)
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    price: Decimal,
}

async fn load_items(
    db_pool: &PgPool,
    order_ids: &[Uuid],
) -> Result<std::collections::HashMap<Uuid, Vec<OrderItemRow>>, AppError> {
    if order_ids.is_empty() {
        return Ok(std::collections::HashMap::new());
    }

    let rows = sqlx::query_as::<_, OrderItemRow>(
        r#"SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, p.price
        FROM order_items oi
        JOIN products p ON oi.product_id = p.id
        WHERE oi.order_id = ANY($1)"#,
    )
    .bind(order_ids)
    .fetch_all(db_pool)
    .await?;

    let mut by_order: std::collections::HashMap<Uuid, Vec<OrderItemRow>> =
        std::collections::HashMap::new();
    for row in rows {
        by_order.entry(row.order_id).or_default().push(row);
    }
    Ok(by_order)
}

fn build_order_response(order: Order, items: Vec<OrderItemRow>) -> OrderResponse {
    let total: Decimal = items.iter().map(|i| i.price).sum();
    OrderResponse {
        id: order.id,
        store_id: order.store_id,
        is_paid: order.is_paid,
        phone: order.phone,
        address: order.address,
        created_at: order.created_at,
        updated_at: order.updated_at,
        items: items
            .into_iter()
            .map(|i| OrderItemResponse {
                id: i.id,
                product_id: i.product_id,
                product_name: i.product_name,
                price: i.price,
            })
            .collect(),
        total,
    }
}

async fn fetch_order_by_id(
    db_pool: &PgPool,
    store_id: Uuid,
    order_id: Uuid,
) -> Result<OrderResponse, AppError> {
    let order = sqlx::query_as::<_, Order>(
        r#"SELECT id, store_id, is_paid, phone, address, created_at, updated_at
        FROM orders
        WHERE id = $1 AND store_id = $2"#,
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Order not found"))?;

    let mut items = load_items(db_pool, &[order_id]).await?;
    let order_items = items.remove(&order_id).unwrap_or_default();
    Ok(build_order_response(order, order_items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_paid_update_flips_only_unpaid_orders() {
        assert!(MARK_PAID_SQL.contains("WHERE id = $1 AND is_paid = FALSE"));
        assert!(MARK_PAID_SQL.contains("is_paid = TRUE"));
    }

    #[test]
    fn mark_paid_update_keeps_absent_contact_fields() {
        assert!(MARK_PAID_SQL.contains("phone = COALESCE($2, phone)"));
        assert!(MARK_PAID_SQL.contains("address = COALESCE($3, address)"));
    }
}
