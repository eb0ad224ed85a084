use axum::{extract::{Path, State}, Json};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dtos::checkout::{CheckoutRequest, CheckoutResponse};
use crate::error::AppError;
use crate::state::AppState;

// POST /{storeId}/checkout - Storefront order placement. Creates an unpaid
// order; the payment callback marks it paid later. No auth: the storefront
// calls this cross-origin on behalf of anonymous shoppers.
pub async fn create_checkout(
    State(AppState { db_pool }): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError> {
    if req.product_ids.is_empty() {
        return Err(AppError::validation("Product ids are required"));
    }

    let store_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
            .bind(store_id)
            .fetch_one(&db_pool)
            .await?;

    if !store_exists {
        return Err(AppError::not_found("Store not found"));
    }

    let products =
        sqlx::query_as::<_, CartProductRow>("SELECT id, price FROM products WHERE id = ANY($1)")
            .bind(&req.product_ids)
            .fetch_all(&db_pool)
            .await?;

    let total = cart_total(&products, &req.product_ids)?;

    let mut tx = db_pool.begin().await?;

    let order_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO orders (store_id) VALUES ($1) RETURNING id",
    )
    .bind(store_id)
    .fetch_one(&mut *tx)
    .await?;

    for product_id in &req.product_ids {
        sqlx::query("INSERT INTO order_items (order_id, product_id) VALUES ($1, $2)")
            .bind(order_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(%order_id, items = req.product_ids.len(), "Checkout order created");

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order_id, total })))
}

#[derive(sqlx::FromRow)]
struct CartProductRow {
    id: Uuid,
    price: Decimal,
}

// The same id may appear several times to order several units; every
// occurrence is charged. A missing product fails the whole cart.
fn cart_total(products: &[CartProductRow], product_ids: &[Uuid]) -> Result<Decimal, AppError> {
    let prices: HashMap<Uuid, Decimal> = products.iter().map(|p| (p.id, p.price)).collect();
    let mut total = Decimal::ZERO;
    for product_id in product_ids {
        match prices.get(product_id) {
            Some(price) => total += *price,
            None => {
                return Err(AppError::validation("One or more products could not be found"))
            }
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(id: Uuid, price: Decimal) -> CartProductRow {
        CartProductRow { id, price }
    }

    #[test]
    fn cart_total_charges_every_occurrence_of_a_product() {
        let shirt = Uuid::new_v4();
        let cap = Uuid::new_v4();
        let products = [row(shirt, dec!(19.99)), row(cap, dec!(7.50))];

        let total = cart_total(&products, &[shirt, shirt, cap]).unwrap();
        assert_eq!(total, dec!(47.48));
    }

    #[test]
    fn cart_total_rejects_unknown_products() {
        let known = Uuid::new_v4();
        let products = [row(known, dec!(5.00))];

        assert!(cart_total(&products, &[known, Uuid::new_v4()]).is_err());
    }

    #[test]
    fn empty_cart_totals_zero() {
        let total = cart_total(&[], &[]).unwrap();
        assert_eq!(total, Decimal::ZERO);
    }
}
