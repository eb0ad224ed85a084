use axum::{extract::{Path, State}, Extension, Json};
use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::store::{CreateStoreRequest, PublicStoreResponse, StoreResponse, UpdateStoreRequest};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::store::Store;
use crate::state::AppState;

pub async fn create_store(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Store name is required"));
    }

    let store = sqlx::query_as::<_, Store>(
        r#"INSERT INTO stores (name, user_id)
        VALUES ($1, $2)
        RETURNING id, name, user_id, created_at, updated_at"#,
    )
    .bind(req.name.trim())
    .bind(&auth.user_id)
    .fetch_one(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(StoreResponse::from(store))))
}

pub async fn list_stores(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let stores = sqlx::query_as::<_, Store>(
        r#"SELECT id, name, user_id, created_at, updated_at
        FROM stores
        WHERE user_id = $1
        ORDER BY created_at DESC"#,
    )
    .bind(&auth.user_id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}

// Open route; the response leaves out the owner's identity subject
pub async fn get_store(
    State(AppState { db_pool }): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<PublicStoreResponse>, AppError> {
    let store = sqlx::query_as::<_, Store>(
        r#"SELECT id, name, user_id, created_at, updated_at
        FROM stores
        WHERE id = $1"#,
    )
    .bind(store_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Store not found"))?;

    Ok(Json(PublicStoreResponse::from(store)))
}

pub async fn update_store(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<UpdateStoreRequest>,
) -> Result<Json<StoreResponse>, AppError> {
    if let Some(ref name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Store name cannot be empty"));
        }
    }

    // Scoping the update by user_id keeps other owners' stores untouchable
    let store = sqlx::query_as::<_, Store>(
        r#"UPDATE stores SET
            name = COALESCE($3, name),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING id, name, user_id, created_at, updated_at"#,
    )
    .bind(store_id)
    .bind(&auth.user_id)
    .bind(req.name.as_deref().map(|s| s.trim()))
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Store not found"))?;

    Ok(Json(StoreResponse::from(store)))
}

pub async fn delete_store(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM stores WHERE id = $1 AND user_id = $2")
        .bind(store_id)
        .bind(&auth.user_id)
        .execute(&db_pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.code().as_deref() == Some("23503") {
                    return AppError::conflict(
                        "Remove the store's billboards, categories, sizes, colors, products and orders first",
                    );
                }
            }
            AppError::db(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Store not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// Writes and owner-only reads under /{storeId}/... call this before touching
// anything store-scoped. Requests for stores the caller does not own fail
// with 403 whether or not the store exists.
pub async fn ensure_store_owner(
    db_pool: &PgPool,
    store_id: Uuid,
    user_id: &str,
) -> Result<(), AppError> {
    let owns = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1 AND user_id = $2)",
    )
    .bind(store_id)
    .bind(user_id)
    .fetch_one(db_pool)
    .await?;

    if !owns {
        return Err(AppError::forbidden("You do not own this store"));
    }

    Ok(())
}
