use axum::{Router, extract::State, response::Response, routing::get};

use crate::{
    error::AppResult,
    extract::PathId,
    response::{redirect, render},
    services::product_service,
    session::Session,
    state::AppState,
    views::Page,
};

pub const PRODUCT_NOT_FOUND_NOTICE: &str = "The selected blanket could not be found.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/products", get(list_products))
        .route("/product/{id}", get(product_detail))
        .route("/about", get(about))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page with the first three active products", body = String, content_type = "text/html")
    ),
    tag = "Catalog"
)]
pub async fn index(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let featured = product_service::list_featured_products(&state.orm).await?;
    render(
        &state,
        session,
        Page::new("index.html").with("featured_products", featured)?,
    )
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All active products", body = String, content_type = "text/html")
    ),
    tag = "Catalog"
)]
pub async fn list_products(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let products = product_service::list_active_products(&state.orm).await?;
    render(
        &state,
        session,
        Page::new("products.html").with("products", products)?,
    )
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = String, content_type = "text/html"),
        (status = 303, description = "Unknown or inactive product, back to /products with a notice")
    ),
    tag = "Catalog"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    mut session: Session,
    PathId(id): PathId,
) -> AppResult<Response> {
    let product = match id {
        Some(id) => product_service::get_active_product(&state.orm, id).await?,
        None => None,
    };

    match product {
        Some(product) => render(
            &state,
            session,
            Page::new("product_detail.html").with("product", product)?,
        ),
        None => {
            session.flash(PRODUCT_NOT_FOUND_NOTICE);
            redirect(&state, &session, "/products")
        }
    }
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "About the shop", body = String, content_type = "text/html")),
    tag = "Catalog"
)]
pub async fn about(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    render(&state, session, Page::new("about.html"))
}
