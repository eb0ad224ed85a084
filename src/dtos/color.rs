use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateColorRequest {
    pub name: String,
    // Hex value rendered as a swatch by the admin UI, e.g. "#8B4513"
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateColorRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ColorResponse {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::color::Color> for ColorResponse {
    fn from(color: crate::models::color::Color) -> Self {
        Self {
            id: color.id,
            store_id: color.store_id,
            name: color.name,
            value: color.value,
            created_at: color.created_at,
            updated_at: color.updated_at,
        }
    }
}
