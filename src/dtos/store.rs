use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub id: Uuid,
    pub name: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Convert from Model to Response DTO
impl From<crate::models::store::Store> for StoreResponse {
    fn from(store: crate::models::store::Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            user_id: store.user_id,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

// Payload for the open single-store read. Anonymous storefront callers never
// see the owner's identity subject.
#[derive(Debug, Serialize)]
pub struct PublicStoreResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::store::Store> for PublicStoreResponse {
    fn from(store: crate::models::store::Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store::Store;

    #[test]
    fn public_store_payload_omits_the_owner_subject() {
        let store = Store {
            id: Uuid::new_v4(),
            name: "Outdoor Gear".to_string(),
            user_id: "user_2abc".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(PublicStoreResponse::from(store)).unwrap();
        assert!(value.get("user_id").is_none());
        assert_eq!(value["name"], "Outdoor Gear");
    }
}
