use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::LoginForm,
        invoice::{InvoiceForm, InvoiceTotals},
        orders::OrderForm,
    },
    models::{Order, Product},
    response::ApiResponse,
    routes::{admin, auth, catalog, health, orders},
    session::SESSION_COOKIE,
};

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::index,
        catalog::list_products,
        catalog::product_detail,
        catalog::about,
        orders::order_page,
        orders::submit_order,
        auth::login_page,
        auth::login,
        auth::logout,
        admin::dashboard,
        admin::list_products,
        admin::list_orders,
        admin::invoice_preview,
        admin::invoice_compute
    ),
    components(
        schemas(
            Product,
            Order,
            OrderForm,
            LoginForm,
            InvoiceForm,
            InvoiceTotals,
            health::HealthData,
            ApiResponse<health::HealthData>
        )
    ),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Public blanket catalogue"),
        (name = "Orders", description = "Order form and submission"),
        (name = "Auth", description = "Admin login and logout"),
        (name = "Admin", description = "Admin panel, requires an admin session"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
