use axum::{extract::{Path, State}, Extension, Json};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::category::{
    CategoryBillboard, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

pub async fn list_categories(
    State(AppState { db_pool }): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"SELECT c.id, c.store_id, c.name, c.created_at, c.updated_at,
            b.id AS billboard_id, b.label AS billboard_label, b.image_url AS billboard_image_url
        FROM categories c
        JOIN billboards b ON c.billboard_id = b.id
        WHERE c.store_id = $1
        ORDER BY c.created_at DESC"#,
    )
    .bind(store_id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

pub async fn get_category(
    State(AppState { db_pool }): State<AppState>,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CategoryResponse>, AppError> {
    fetch_category_by_id(&db_pool, store_id, category_id)
        .await
        .map(Json)
}

pub async fn create_category(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Category name is required"));
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    // The billboard must belong to the same store
    let billboard_ok = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM billboards WHERE id = $1 AND store_id = $2)",
    )
    .bind(req.billboard_id)
    .bind(store_id)
    .fetch_one(&db_pool)
    .await?;

    if !billboard_ok {
        return Err(AppError::not_found("Billboard not found"));
    }

    let category_id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO categories (store_id, billboard_id, name)
        VALUES ($1, $2, $3)
        RETURNING id"#,
    )
    .bind(store_id)
    .bind(req.billboard_id)
    .bind(req.name.trim())
    .fetch_one(&db_pool)
    .await?;

    let category = fetch_category_by_id(&db_pool, store_id, category_id).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    if let Some(ref name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    if let Some(billboard_id) = req.billboard_id {
        let billboard_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM billboards WHERE id = $1 AND store_id = $2)",
        )
        .bind(billboard_id)
        .bind(store_id)
        .fetch_one(&db_pool)
        .await?;

        if !billboard_ok {
            return Err(AppError::not_found("Billboard not found"));
        }
    }

    let updated = sqlx::query_scalar::<_, Uuid>(
        r#"UPDATE categories SET
            name = COALESCE($3, name),
            billboard_id = COALESCE($4, billboard_id),
            updated_at = NOW()
        WHERE id = $1 AND store_id = $2
        RETURNING id"#,
    )
    .bind(category_id)
    .bind(store_id)
    .bind(req.name.as_deref().map(|s| s.trim()))
    .bind(req.billboard_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Category not found"))?;

    fetch_category_by_id(&db_pool, store_id, updated)
        .await
        .map(Json)
}

pub async fn delete_category(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND store_id = $2")
        .bind(category_id)
        .bind(store_id)
        .execute(&db_pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.code().as_deref() == Some("23503") {
                    return AppError::conflict("Remove products in this category first");
                }
            }
            AppError::db(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Category not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    billboard_id: Uuid,
    billboard_label: String,
    billboard_image_url: String,
}

impl From<CategoryRow> for CategoryResponse {
    fn from(row: CategoryRow) -> Self {
        CategoryResponse {
            id: row.id,
            store_id: row.store_id,
            billboard_id: row.billboard_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            billboard: CategoryBillboard {
                id: row.billboard_id,
                label: row.billboard_label,
                image_url: row.billboard_image_url,
            },
        }
    }
}

async fn fetch_category_by_id(
    db_pool: &PgPool,
    store_id: Uuid,
    category_id: Uuid,
) -> Result<CategoryResponse, AppError> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"SELECT c.id, c.store_id, c.name, c.created_at, c.updated_at,
            b.id AS billboard_id, b.label AS billboard_label, b.image_url AS billboard_image_url
        FROM categories c
        JOIN billboards b ON c.billboard_id = b.id
        WHERE c.id = $1 AND c.store_id = $2"#,
    )
    .bind(category_id)
    .bind(store_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Category not found"))?;

    Ok(CategoryResponse::from(row))
}
