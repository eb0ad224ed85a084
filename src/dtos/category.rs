use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub billboard_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub billboard_id: Option<Uuid>,
}

// The storefront renders a category page from its billboard, so the
// billboard rides along on every category read.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub store_id: Uuid,
    pub billboard_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub billboard: CategoryBillboard,
}

#[derive(Debug, Serialize)]
pub struct CategoryBillboard {
    pub id: Uuid,
    pub label: String,
    pub image_url: String,
}
