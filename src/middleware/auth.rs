use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    response::redirect,
    session::Session,
    state::AppState,
};

pub const LOGIN_REQUIRED_NOTICE: &str = "Admin login required.";

/// Proof that the current request belongs to an authenticated admin session.
///
/// Only [`require_admin`] creates one, so a handler that takes it as an
/// argument cannot run for an anonymous visitor.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub sid: Uuid,
}

pub fn ensure_admin(session: &Session) -> Result<AdminContext, AppError> {
    if !session.is_admin() {
        return Err(AppError::Unauthorized);
    }
    Ok(AdminContext { sid: session.sid() })
}

/// Guard for the `/admin` router: anonymous sessions are sent to `/login`
/// with a notice before the handler is ever dispatched.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let mut session = state.sessions.read(request.headers());
    match ensure_admin(&session) {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            Ok(next.run(request).await)
        }
        Err(AppError::Unauthorized) => {
            tracing::warn!(uri = %request.uri(), "admin route without admin session");
            session.flash(LOGIN_REQUIRED_NOTICE);
            redirect(&state, &session, "/login")
        }
        Err(err) => Err(err),
    }
}

impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
