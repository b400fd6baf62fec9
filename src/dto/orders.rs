use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Order submission exactly as the browser posts it; every field is raw text.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct OrderForm {
    pub product_id: Option<String>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub qty: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderPageQuery {
    /// Product to pre-select on the form.
    pub product_id: Option<String>,
}
