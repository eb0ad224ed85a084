use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateSizeRequest {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSizeRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::size::Size> for SizeResponse {
    fn from(size: crate::models::size::Size) -> Self {
        Self {
            id: size.id,
            store_id: size.store_id,
            name: size.name,
            value: size.value,
            created_at: size.created_at,
            updated_at: size.updated_at,
        }
    }
}
