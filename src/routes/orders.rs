use axum::{Router, extract::State, response::Response, routing::get};

use crate::{
    dto::orders::{OrderForm, OrderPageQuery},
    error::AppResult,
    extract::{LenientForm, LenientQuery},
    response::{redirect, render},
    services::{order_service, parse::non_blank, product_service},
    session::Session,
    state::AppState,
    views::Page,
};

pub const ORDER_RECEIVED_NOTICE: &str =
    "Your order has been received. We will confirm it by Viber or phone.";

pub fn router() -> Router<AppState> {
    Router::new().route("/order", get(order_page).post(submit_order))
}

#[utoipa::path(
    get,
    path = "/order",
    params(OrderPageQuery),
    responses(
        (status = 200, description = "Order form, optionally with a product pre-selected", body = String, content_type = "text/html")
    ),
    tag = "Orders"
)]
pub async fn order_page(
    State(state): State<AppState>,
    session: Session,
    LenientQuery(query): LenientQuery<OrderPageQuery>,
) -> AppResult<Response> {
    let products = product_service::list_active_products(&state.orm).await?;

    let selected_id =
        non_blank(query.product_id.as_deref()).and_then(|raw| raw.parse::<i32>().ok());
    let selected_product = match selected_id {
        Some(id) => product_service::get_active_product(&state.orm, id).await?,
        None => None,
    };

    render(
        &state,
        session,
        Page::new("order.html")
            .with("products", products)?
            .with("selected_product", selected_product)?,
    )
}

#[utoipa::path(
    post,
    path = "/order",
    request_body(content = OrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Order stored, back to / with a confirmation notice")
    ),
    tag = "Orders"
)]
pub async fn submit_order(
    State(state): State<AppState>,
    mut session: Session,
    LenientForm(form): LenientForm<OrderForm>,
) -> AppResult<Response> {
    order_service::create_order(&state.orm, form).await?;
    session.flash(ORDER_RECEIVED_NOTICE);
    redirect(&state, &session, "/")
}
