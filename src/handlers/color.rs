use axum::{extract::{Path, State}, Extension, Json};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dtos::color::{ColorResponse, CreateColorRequest, UpdateColorRequest};
use crate::error::AppError;
use crate::handlers::store::ensure_store_owner;
use crate::middleware::auth::AuthContext;
use crate::models::color::Color;
use crate::state::AppState;

pub async fn list_colors(
    State(AppState { db_pool }): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<Vec<ColorResponse>>, AppError> {
    let colors = sqlx::query_as::<_, Color>(
        r#"SELECT id, store_id, name, value, created_at, updated_at
        FROM colors
        WHERE store_id = $1
        ORDER BY created_at DESC"#,
    )
    .bind(store_id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(colors.into_iter().map(ColorResponse::from).collect()))
}

pub async fn get_color(
    State(AppState { db_pool }): State<AppState>,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ColorResponse>, AppError> {
    let color = sqlx::query_as::<_, Color>(
        r#"SELECT id, store_id, name, value, created_at, updated_at
        FROM colors
        WHERE id = $1 AND store_id = $2"#,
    )
    .bind(color_id)
    .bind(store_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Color not found"))?;

    Ok(Json(ColorResponse::from(color)))
}

pub async fn create_color(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<CreateColorRequest>,
) -> Result<(StatusCode, Json<ColorResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Color name is required"));
    }
    if req.value.trim().is_empty() {
        return Err(AppError::validation("Color value is required"));
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let color = sqlx::query_as::<_, Color>(
        r#"INSERT INTO colors (store_id, name, value)
        VALUES ($1, $2, $3)
        RETURNING id, store_id, name, value, created_at, updated_at"#,
    )
    .bind(store_id)
    .bind(req.name.trim())
    .bind(req.value.trim())
    .fetch_one(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(ColorResponse::from(color))))
}

pub async fn update_color(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateColorRequest>,
) -> Result<Json<ColorResponse>, AppError> {
    if let Some(ref name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Color name cannot be empty"));
        }
    }
    if let Some(ref value) = req.value {
        if value.trim().is_empty() {
            return Err(AppError::validation("Color value cannot be empty"));
        }
    }

    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let color = sqlx::query_as::<_, Color>(
        r#"UPDATE colors SET
            name = COALESCE($3, name),
            value = COALESCE($4, value),
            updated_at = NOW()
        WHERE id = $1 AND store_id = $2
        RETURNING id, store_id, name, value, created_at, updated_at"#,
    )
    .bind(color_id)
    .bind(store_id)
    .bind(req.name.as_deref().map(|s| s.trim()))
    .bind(req.value.as_deref().map(|s| s.trim()))
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Color not found"))?;

    Ok(Json(ColorResponse::from(color)))
}

pub async fn delete_color(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_store_owner(&db_pool, store_id, &auth.user_id).await?;

    let result = sqlx::query("DELETE FROM colors WHERE id = $1 AND store_id = $2")
        .bind(color_id)
        .bind(store_id)
        .execute(&db_pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.code().as_deref() == Some("23503") {
                    return AppError::conflict("Remove products using this color first");
                }
            }
            AppError::db(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Color not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
