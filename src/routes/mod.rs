use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Response,
    routing::get,
};

use crate::{
    error::AppResult,
    middleware::auth::require_admin,
    response::render_with_status,
    session::Session,
    state::AppState,
    views::Page,
};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod orders;

/// Every route of the shop with state bound. Transport layers (tracing,
/// request ids, limits) are added by the binary.
pub fn create_router(state: AppState) -> Router {
    let admin = admin::router().route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(catalog::router())
        .merge(orders::router())
        .merge(auth::router())
        .nest("/admin", admin)
        .route("/health", get(health::health_check))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(State(state): State<AppState>, mut session: Session) -> AppResult<Response> {
    render_with_status(
        &state,
        &mut session,
        Page::new("not_found.html"),
        StatusCode::NOT_FOUND,
    )
}
