use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Id, Patch};

/// Represents a product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub product_type: String,
    pub category: Option<String>,
    /// Signed id of the attached image blob.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds an unsaved product. The store assigns `id` and timestamps.
    pub fn new(name: impl Into<String>, price: Decimal, product_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            price,
            product_type: product_type.into(),
            category: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub product_type: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_signed_id: Option<String>,
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub product_type: Option<String>,
    pub description: Patch<String>,
    pub category: Patch<String>,
    pub image_signed_id: Option<String>,
}
