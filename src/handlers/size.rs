use axum::{extract::{Path, State}, Extension, Json};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dtos::size::{CreateSizeRequest, SizeResponse, UpdateSizeRequest};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::models::size::Size;
use crate::state::AppState;

pub async fn list_sizes(
    State(AppState { db_pool }): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<SizeResponse>>, AppError> {
    let sizes = sqlx::query_as::<_, Size>(
        r#"SELECT id, store_id, name, value, created_at, updated_at
        FROM sizes
        WHERE store_id = $1
        ORDER BY created_at DESC"#,
    )
    .bind(store_id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(sizes.into_iter().map(SizeResponse::from).collect()))
}

pub async fn get_size(
    State(AppState { db_pool }): State<AppState>,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SizeResponse>, AppError> {
    let size = sqlx::query_as::<_, Size>(
        r#"SELECT id, store_id, name, value, created_at, updated_at
        FROM sizes
        WHERE id = $1 AND store_id = $2"#,
    )
    .bind(size_id)
    .bind(store_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Size not found"))?;

    Ok(Json(SizeResponse::from(size)))
}

pub async fn create_size(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<CreateSizeRequest>,
) -> Result<(StatusCode, Json<SizeResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Size name is required"));
    }
    if req.value.trim().is_empty() {
        return Err(AppError::validation("Size value is required"));
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let size = sqlx::query_as::<_, Size>(
        r#"INSERT INTO sizes (store_id, name, value)
        VALUES ($1, $2, $3)
        RETURNING id, store_id, name, value, created_at, updated_at"#,
    )
    .bind(store_id)
    .bind(req.name.trim())
    .bind(req.value.trim())
    .fetch_one(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(SizeResponse::from(size))))
}

pub async fn update_size(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateSizeRequest>,
) -> Result<Json<SizeResponse>, AppError> {
    if let Some(ref name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Size name cannot be empty"));
        }
    }
    if let Some(ref value) = req.value {
        if value.trim().is_empty() {
            return Err(AppError::validation("Size value cannot be empty"));
        }
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let size = sqlx::query_as::<_, Size>(
        r#"UPDATE sizes SET
            name = COALESCE($3, name),
            value = COALESCE($4, value),
            updated_at = NOW()
        WHERE id = $1 AND store_id = $2
        RETURNING id, store_id, name, value, created_at, updated_at"#,
    )
    .bind(size_id)
    .bind(store_id)
    .bind(req.name.as_deref().map(|s| s.trim()))
    .bind(req.value.as_deref().map(|s| s.trim()))
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Size not found"))?;

    Ok(Json(SizeResponse::from(size)))
}

pub async fn delete_size(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let result = sqlx::query("DELETE FROM sizes WHERE id = $1 AND store_id = $2")
        .bind(size_id)
        .bind(store_id)
        .execute(&db_pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.code().as_deref() == Some("23503") {
                    return AppError::conflict("Remove products using this size first");
                }
            }
            AppError::db(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Size not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
