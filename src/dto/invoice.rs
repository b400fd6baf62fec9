use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, Product};

pub const PAYMENT_ORDER_ONLY: &str = "order_only";
pub const PAYMENT_FULL_PAID: &str = "full_paid";

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct InvoiceForm {
    pub unit_price: Option<String>,
    pub amount_paid: Option<String>,
    pub payment_mode: Option<String>,
}

/// Billing figures for one order. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InvoiceTotals {
    pub qty: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub amount_paid: f64,
    pub balance: f64,
    pub payment_mode: String,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoiceView {
    pub order: Order,
    pub product: Option<Product>,
    #[serde(flatten)]
    pub totals: InvoiceTotals,
}
