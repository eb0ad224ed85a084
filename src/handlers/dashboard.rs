use axum::{extract::{Path, State}, Extension, Json};
use uuid::Uuid;

use crate::dtos::dashboard::{DashboardSummary, MonthlyRevenue};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::reports;
use crate::state::AppState;

// GET /{storeId}/dashboard/graph-revenue - Twelve months of paid revenue,
// January through December, for the overview chart
pub async fn get_graph_revenue(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<MonthlyRevenue>>, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let orders = reports::load_paid_orders(&db_pool, store_id).await?;
    Ok(Json(reports::monthly_revenue(&orders)))
}

// GET /{storeId}/dashboard/summary - The overview cards: lifetime revenue,
// paid order count and products in stock
pub async fn get_summary(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<DashboardSummary>, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let orders = reports::load_paid_orders(&db_pool, store_id).await?;
    let total_revenue = reports::total_revenue(&orders);

    let sales_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE store_id = $1 AND is_paid = TRUE",
    )
    .bind(store_id)
    .fetch_one(&db_pool)
    .await?;

    let stock_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products WHERE store_id = $1 AND is_archived = FALSE",
    )
    .bind(store_id)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(DashboardSummary {
        total_revenue,
        sales_count,
        stock_count,
    }))
}
