use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{orders, products};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name_mm: String,
    pub name_en: String,
    pub price: f64,
    pub image: Option<String>,
    pub short_desc_mm: Option<String>,
    pub desc_mm: Option<String>,
    pub is_active: bool,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name_mm: model.name_mm,
            name_en: model.name_en,
            price: model.price,
            image: model.image,
            short_desc_mm: model.short_desc_mm,
            desc_mm: model.desc_mm,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub product_id: Option<i32>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub qty: i32,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            customer_name: model.customer_name,
            phone: model.phone,
            city: model.city,
            address: model.address,
            qty: model.qty,
            created_at: model.created_at,
        }
    }
}
