// src/dtos/product.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub size_id: Uuid,
    pub color_id: Uuid,
    pub images: Vec<ImagePayload>,
    pub is_featured: bool,
    pub is_archived: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    // When present, replaces the product's entire image set
    pub images: Option<Vec<ImagePayload>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub is_featured: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: ProductCategory,
    pub size: ProductSize,
    pub color: ProductColor,
    pub images: Vec<ProductImageResponse>,
}

#[derive(Debug, Serialize)]
pub struct ProductCategory {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProductSize {
    pub id: Uuid,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ProductColor {
    pub id: Uuid,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ProductImageResponse {
    pub id: Uuid,
    pub url: String,
}
