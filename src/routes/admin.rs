use axum::{Router, extract::State, response::Response, routing::get};

use crate::{
    dto::invoice::InvoiceForm,
    error::AppResult,
    extract::{LenientForm, PathId},
    middleware::auth::AdminContext,
    response::{redirect, render},
    services::{invoice_service, order_service, product_service},
    session::Session,
    state::AppState,
    views::Page,
};

pub const ORDER_NOT_FOUND_NOTICE: &str = "That order could not be found.";

/// Routes under `/admin`. The caller wraps this router in the admin guard.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/products", get(list_products))
        .route("/orders", get(list_orders))
        .route(
            "/orders/{id}/invoice",
            get(invoice_preview).post(invoice_compute),
        )
}

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Admin dashboard", body = String, content_type = "text/html"),
        (status = 303, description = "No admin session, redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminContext,
    session: Session,
) -> AppResult<Response> {
    render(&state, session, Page::new("admin_dashboard.html"))
}

#[utoipa::path(
    get,
    path = "/admin/products",
    responses(
        (status = 200, description = "Active products, read only", body = String, content_type = "text/html"),
        (status = 303, description = "No admin session, redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _admin: AdminContext,
    session: Session,
) -> AppResult<Response> {
    let products = product_service::list_active_products(&state.orm).await?;
    render(
        &state,
        session,
        Page::new("admin_products.html").with("products", products)?,
    )
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    responses(
        (status = 200, description = "All orders, most recent first", body = String, content_type = "text/html"),
        (status = 303, description = "No admin session, redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _admin: AdminContext,
    session: Session,
) -> AppResult<Response> {
    let orders = order_service::list_orders(&state.orm).await?;
    render(
        &state,
        session,
        Page::new("admin_orders.html").with("orders", orders)?,
    )
}

#[utoipa::path(
    get,
    path = "/admin/orders/{id}/invoice",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Invoice preview: nothing paid, full balance due", body = String, content_type = "text/html"),
        (status = 303, description = "Unknown order or no admin session")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn invoice_preview(
    State(state): State<AppState>,
    admin: AdminContext,
    session: Session,
    PathId(id): PathId,
) -> AppResult<Response> {
    show_invoice(state, admin, session, id, None).await
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/invoice",
    params(("id" = i32, Path, description = "Order id")),
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Invoice recomputed from the submitted figures, not stored", body = String, content_type = "text/html"),
        (status = 303, description = "Unknown order or no admin session")
    ),
    security(("session_cookie" = [])),
    tag = "Admin"
)]
pub async fn invoice_compute(
    State(state): State<AppState>,
    admin: AdminContext,
    session: Session,
    PathId(id): PathId,
    LenientForm(form): LenientForm<InvoiceForm>,
) -> AppResult<Response> {
    show_invoice(state, admin, session, id, Some(form)).await
}

async fn show_invoice(
    state: AppState,
    admin: AdminContext,
    mut session: Session,
    id: Option<i32>,
    form: Option<InvoiceForm>,
) -> AppResult<Response> {
    let invoice = match id {
        Some(id) => invoice_service::build_invoice(&state.orm, id, form.as_ref()).await?,
        None => None,
    };

    let Some(invoice) = invoice else {
        tracing::debug!(sid = %admin.sid, order = ?id, "invoice for unknown order");
        session.flash(ORDER_NOT_FOUND_NOTICE);
        return redirect(&state, &session, "/admin/orders");
    };

    render(
        &state,
        session,
        Page::new("admin_invoice.html").with_fields(invoice)?,
    )
}
