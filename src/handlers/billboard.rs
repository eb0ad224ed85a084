use axum::{extract::{Path, State}, Extension, Json};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dtos::billboard::{BillboardResponse, CreateBillboardRequest, UpdateBillboardRequest};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::models::billboard::Billboard;
use crate::state::AppState;

pub async fn list_billboards(
    State(AppState { db_pool }): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<BillboardResponse>>, AppError> {
    let billboards = sqlx::query_as::<_, Billboard>(
        r#"SELECT id, store_id, label, image_url, created_at, updated_at
        FROM billboards
        WHERE store_id = $1
        ORDER BY created_at DESC"#,
    )
    .bind(store_id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(
        billboards.into_iter().map(BillboardResponse::from).collect(),
    ))
}

pub async fn get_billboard(
    State(AppState { db_pool }): State<AppState>,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BillboardResponse>, AppError> {
    let billboard = sqlx::query_as::<_, Billboard>(
        r#"SELECT id, store_id, label, image_url, created_at, updated_at
        FROM billboards
        WHERE id = $1 AND store_id = $2"#,
    )
    .bind(billboard_id)
    .bind(store_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Billboard not found"))?;

    Ok(Json(BillboardResponse::from(billboard)))
}

pub async fn create_billboard(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<CreateBillboardRequest>,
) -> Result<(StatusCode, Json<BillboardResponse>), AppError> {
    if req.label.trim().is_empty() {
        return Err(AppError::validation("Label is required"));
    }
    if req.image_url.trim().is_empty() {
        return Err(AppError::validation("Image URL is required"));
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let billboard = sqlx::query_as::<_, Billboard>(
        r#"INSERT INTO billboards (store_id, label, image_url)
        VALUES ($1, $2, $3)
        RETURNING id, store_id, label, image_url, created_at, updated_at"#,
    )
    .bind(store_id)
    .bind(req.label.trim())
    .bind(&req.image_url)
    .fetch_one(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(BillboardResponse::from(billboard))))
}

pub async fn update_billboard(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateBillboardRequest>,
) -> Result<Json<BillboardResponse>, AppError> {
    if let Some(ref label) = req.label {
        if label.trim().is_empty() {
            return Err(AppError::validation("Label cannot be empty"));
        }
    }
    if let Some(ref url) = req.image_url {
        if url.trim().is_empty() {
            return Err(AppError::validation("Image URL cannot be empty"));
        }
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let billboard = sqlx::query_as::<_, Billboard>(
        r#"UPDATE billboards SET
            label = COALESCE($3, label),
            image_url = COALESCE($4, image_url),
            updated_at = NOW()
        WHERE id = $1 AND store_id = $2
        RETURNING id, store_id, label, image_url, created_at, updated_at"#,
    )
    .bind(billboard_id)
    .bind(store_id)
    .bind(req.label.as_deref().map(|s| s.trim()))
    .bind(req.image_url.as_deref())
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Billboard not found"))?;

    Ok(Json(BillboardResponse::from(billboard)))
}

pub async fn delete_billboard(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let result = sqlx::query("DELETE FROM billboards WHERE id = $1 AND store_id = $2")
        .bind(billboard_id)
        .bind(store_id)
        .execute(&db_pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.code().as_deref() == Some("23503") {
                    return AppError::conflict("Remove categories using this billboard first");
                }
            }
            AppError::db(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Billboard not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
