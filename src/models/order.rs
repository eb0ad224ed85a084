use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// Created unpaid by checkout; the payment callback flips `is_paid` and
// fills in phone/address. Nothing else ever writes to an order.
#[derive(Debug, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub store_id: Uuid,
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
