use axum::{Router, extract::State, response::Response, routing::get};

use crate::{
    dto::auth::LoginForm,
    error::{AppError, AppResult},
    extract::LenientForm,
    response::{redirect, render},
    services::auth_service::login_admin,
    session::Session,
    state::AppState,
    views::Page,
};

pub const LOGIN_OK_NOTICE: &str = "Logged in as admin.";
pub const LOGIN_FAILED_NOTICE: &str = "Incorrect username or password.";
pub const LOGOUT_NOTICE: &str = "Logged out.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Admin login form", body = String, content_type = "text/html")),
    tag = "Auth"
)]
pub async fn login_page(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    render(&state, session, Page::new("login.html"))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Credentials accepted, on to /admin"),
        (status = 200, description = "Credentials rejected, form shown again with a notice", body = String, content_type = "text/html")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    LenientForm(form): LenientForm<LoginForm>,
) -> AppResult<Response> {
    match login_admin(state.credentials.as_ref(), &mut session, &form) {
        Ok(()) => {
            session.flash(LOGIN_OK_NOTICE);
            redirect(&state, &session, "/admin")
        }
        Err(AppError::InvalidCredentials) => {
            session.flash(LOGIN_FAILED_NOTICE);
            render(&state, session, Page::new("login.html"))
        }
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared, back to /")),
    tag = "Auth"
)]
pub async fn logout(State(state): State<AppState>, mut session: Session) -> AppResult<Response> {
    tracing::info!(sid = %session.sid(), was_admin = session.is_admin(), "session cleared");
    session.clear();
    session.flash(LOGOUT_NOTICE);
    redirect(&state, &session, "/")
}
