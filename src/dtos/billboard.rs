use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateBillboardRequest {
    pub label: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBillboardRequest {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BillboardResponse {
    pub id: Uuid,
    pub store_id: Uuid,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::billboard::Billboard> for BillboardResponse {
    fn from(billboard: crate::models::billboard::Billboard) -> Self {
        Self {
            id: billboard.id,
            store_id: billboard.store_id,
            label: billboard.label,
            image_url: billboard.image_url,
            created_at: billboard.created_at,
            updated_at: billboard.updated_at,
        }
    }
}
