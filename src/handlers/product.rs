// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Error as SqlxError, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::dtos::product::{
    CreateProductRequest, ProductCategory, ProductColor, ProductImageResponse, ProductResponse,
    ProductSize, UpdateProductRequest,
};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::models::product::ProductImage;
use crate::state::AppState;
use tracing::{error, instrument};

fn map_reference_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            AppError::validation(message)
        }
        other => other.into(),
    }
}

// The is_featured flag only ever narrows to featured products; a false or
// malformed value reads the same as leaving it off.
fn featured_filter(params: &HashMap<String, String>) -> bool {
    params.get("is_featured").and_then(|s| s.parse::<bool>().ok()) == Some(true)
}

// GET /{storeId}/products - List products for the storefront and admin tables.
// Supports category_id, size_id and color_id filters plus the is_featured
// flag; archived products are never listed.
#[instrument(skip(state))]
pub async fn list_products(
    Path(store_id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let category_id = params.get("category_id").and_then(|s| s.parse::<Uuid>().ok());
    let size_id = params.get("size_id").and_then(|s| s.parse::<Uuid>().ok());
    let color_id = params.get("color_id").and_then(|s| s.parse::<Uuid>().ok());
    let featured_only = featured_filter(&params);

    let mut query_str = String::from(
        r#"SELECT p.id, p.store_id, p.name, p.price, p.is_featured, p.is_archived,
            p.created_at, p.updated_at,
            c.id AS category_id, c.name AS category_name,
            s.id AS size_id, s.name AS size_name, s.value AS size_value,
            col.id AS color_id, col.name AS color_name, col.value AS color_value
        FROM products p
        JOIN categories c ON p.category_id = c.id
        JOIN sizes s ON p.size_id = s.id
        JOIN colors col ON p.color_id = col.id
        WHERE p.store_id = $1 AND p.is_archived = FALSE"#,
    );

    let mut binds = 1;
    if category_id.is_some() {
        binds += 1;
        query_str.push_str(&format!(" AND p.category_id = ${}", binds));
    }
    if size_id.is_some() {
        binds += 1;
        query_str.push_str(&format!(" AND p.size_id = ${}", binds));
    }
    if color_id.is_some() {
        binds += 1;
        query_str.push_str(&format!(" AND p.color_id = ${}", binds));
    }
    if featured_only {
        query_str.push_str(" AND p.is_featured = TRUE");
    }
    query_str.push_str(" ORDER BY p.created_at DESC");

    let mut query = sqlx::query_as::<_, ProductRow>(&query_str).bind(store_id);
    if let Some(cid) = category_id {
        query = query.bind(cid);
    }
    if let Some(sid) = size_id {
        query = query.bind(sid);
    }
    if let Some(cid) = color_id {
        query = query.bind(cid);
    }

    let rows = match query.fetch_all(&state.db_pool).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(?e, "Failed to fetch products");
            return Err(e.into());
        }
    };

    let product_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut images = load_images(&state.db_pool, &product_ids).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| {
                let imgs = images.remove(&row.id).unwrap_or_default();
                row.into_response(imgs)
            })
            .collect(),
    ))
}

// GET /{storeId}/products/{productId} - Single product with images
#[instrument(skip(state), fields(product_id))]
pub async fn get_product(
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    fetch_product_by_id(&state.db_pool, store_id, product_id)
        .await
        .map(Json)
}

// POST /{storeId}/products - Create product with its images
#[instrument(skip(state, payload, auth))]
pub async fn create_product(
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if payload.price < Decimal::ZERO {
        return Err(AppError::validation("Price cannot be negative"));
    }
    if payload.images.is_empty() {
        return Err(AppError::validation("At least one image is required"));
    }

    ensure_store_owner(&state.db_pool, store_id, &auth.user_id).await?;

    let mut tx = state.db_pool.begin().await?;

    let product_id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO products (store_id, category_id, size_id, color_id, name, price, is_featured, is_archived)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id"#,
    )
    .bind(store_id)
    .bind(payload.category_id)
    .bind(payload.size_id)
    .bind(payload.color_id)
    .bind(payload.name.trim())
    .bind(payload.price)
    .bind(payload.is_featured)
    .bind(payload.is_archived)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_reference_violation(e, "Category, size or color not found"))?;

    for image in &payload.images {
        sqlx::query("INSERT INTO product_images (product_id, url) VALUES ($1, $2)")
            .bind(product_id)
            .bind(&image.url)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let product = fetch_product_by_id(&state.db_pool, store_id, product_id).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PATCH /{storeId}/products/{productId} - Partial update; a supplied images
// array replaces the existing set
#[instrument(skip(state, payload, auth), fields(product_id))]
pub async fn update_product(
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if let Some(ref name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }
    }
    if let Some(price) = payload.price {
        if price < Decimal::ZERO {
            return Err(AppError::validation("Price cannot be negative"));
        }
    }
    if let Some(ref images) = payload.images {
        if images.is_empty() {
            return Err(AppError::validation("At least one image is required"));
        }
    }

    ensure_store_owner(&state.db_pool, store_id, &auth.user_id).await?;

    let mut tx = state.db_pool.begin().await?;

    let updated = sqlx::query_scalar::<_, Uuid>(
        r#"UPDATE products SET
            name = COALESCE($3, name),
            price = COALESCE($4, price),
            category_id = COALESCE($5, category_id),
            size_id = COALESCE($6, size_id),
            color_id = COALESCE($7, color_id),
            is_featured = COALESCE($8, is_featured),
            is_archived = COALESCE($9, is_archived),
            updated_at = NOW()
        WHERE id = $1 AND store_id = $2
        RETURNING id"#,
    )
    .bind(product_id)
    .bind(store_id)
    .bind(payload.name.as_deref().map(|s| s.trim()))
    .bind(payload.price)
    .bind(payload.category_id)
    .bind(payload.size_id)
    .bind(payload.color_id)
    .bind(payload.is_featured)
    .bind(payload.is_archived)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| map_reference_violation(e, "Category, size or color not found"))?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    if let Some(images) = payload.images {
        sqlx::query("DELETE FROM product_images WHERE product_id = $1")
            .bind(updated)
            .execute(&mut *tx)
            .await?;

        for image in &images {
            sqlx::query("INSERT INTO product_images (product_id, url) VALUES ($1, $2)")
                .bind(updated)
                .bind(&image.url)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    fetch_product_by_id(&state.db_pool, store_id, updated)
        .await
        .map(Json)
}

// DELETE /{storeId}/products/{productId}
#[instrument(skip(state, auth), fields(product_id))]
pub async fn delete_product(
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<StatusCode, AppError> {
    ensure_store_owner(&state.db_pool, store_id, &auth.user_id).await?;

    let result = sqlx::query("DELETE FROM products WHERE id = $1 AND store_id = $2")
        .bind(product_id)
        .bind(store_id)
        .execute(&state.db_pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.code().as_deref() == Some("23503") {
                    return AppError::conflict("Product appears on existing orders");
                }
            }
            AppError::db(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    price: Decimal,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_id: Uuid,
    category_name: String,
    size_id: Uuid,
    size_name: String,
    size_value: String,
    color_id: Uuid,
    color_name: String,
    color_value: String,
}

impl ProductRow {
    fn into_response(self, images: Vec<ProductImageResponse>) -> ProductResponse {
        ProductResponse {
            id: self.id,
            store_id: self.store_id,
            name: self.name,
            price: self.price,
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            created_at: self.created_at,
            updated_at: self.updated_at,
            category: ProductCategory {
                id: self.category_id,
                name: self.category_name,
            },
            size: ProductSize {
                id: self.size_id,
                name: self.size_name,
                value: self.size_value,
            },
            color: ProductColor {
                id: self.color_id,
                name: self.color_name,
                value: self.color_value,
            },
            images,
        }
    }
}

async fn load_images(
    db_pool: &PgPool,
    product_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<ProductImageResponse>>, AppError> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, ProductImage>(
        r#"SELECT id, product_id, url
        FROM product_images
        WHERE product_id = ANY($1)
        ORDER BY created_at ASC"#,
    )
    .bind(product_ids)
    .fetch_all(db_pool)
    .await?;

    let mut by_product: HashMap<Uuid, Vec<ProductImageResponse>> = HashMap::new();
    for row in rows {
        by_product
            .entry(row.product_id)
            .or_default()
            .push(ProductImageResponse {
                id: row.id,
                url: row.url,
            });
    }
    Ok(by_product)
}

async fn fetch_product_by_id(
    db_pool: &PgPool,
    store_id: Uuid,
    product_id: Uuid,
) -> Result<ProductResponse, AppError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"SELECT p.id, p.store_id, p.name, p.price, p.is_featured, p.is_archived,
            p.created_at, p.updated_at,
            c.id AS category_id, c.name AS category_name,
            s.id AS size_id, s.name AS size_name, s.value AS size_value,
            col.id AS color_id, col.name AS color_name, col.value AS color_value
        FROM products p
        JOIN categories c ON p.category_id = c.id
        JOIN sizes s ON p.size_id = s.id
        JOIN colors col ON p.color_id = col.id
        WHERE p.id = $1 AND p.store_id = $2"#,
    )
    .bind(product_id)
    .bind(store_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    let mut images = load_images(db_pool, &[product_id]).await?;
    let imgs = images.remove(&product_id).unwrap_or_default();
    Ok(row.into_response(imgs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn featured_filter_narrows_only_on_true() {
        assert!(featured_filter(&params(&[("is_featured", "true")])));
        assert!(!featured_filter(&params(&[("is_featured", "yes")])));
        assert!(!featured_filter(&params(&[])));
    }

    #[test]
    fn featured_false_reads_the_same_as_no_flag() {
        let with_false = featured_filter(&params(&[("is_featured", "false")]));
        let without = featured_filter(&params(&[]));
        assert_eq!(with_false, without);
        assert!(!with_false);
    }
}
