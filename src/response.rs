use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{error::AppResult, session::Session, state::AppState, views::Page};

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Render `page` for this session. Pending notices are handed to the page and
/// consumed; the cookie is re-issued only when the session changed.
pub fn render(state: &AppState, mut session: Session, page: Page) -> AppResult<Response> {
    render_with_status(state, &mut session, page, StatusCode::OK)
}

pub fn render_with_status(
    state: &AppState,
    session: &mut Session,
    page: Page,
    status: StatusCode,
) -> AppResult<Response> {
    let Page {
        template,
        mut context,
    } = page;
    let notices = session.take_notices();
    context.insert("notices".into(), Value::from(notices));
    context.insert("is_admin".into(), Value::from(session.is_admin()));

    let body = state.views.render(template, &Value::Object(context))?;
    let mut response = (status, Html(body)).into_response();
    attach_session(state, session, &mut response)?;
    Ok(response)
}

/// `303 See Other` to `location`, carrying the session if it changed.
pub fn redirect(state: &AppState, session: &Session, location: &str) -> AppResult<Response> {
    let mut response = see_other(location);
    attach_session(state, session, &mut response)?;
    Ok(response)
}

pub fn see_other(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response()
}

fn attach_session(state: &AppState, session: &Session, response: &mut Response) -> AppResult<()> {
    if session.is_dirty() {
        let cookie = state.sessions.set_cookie(session)?;
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    Ok(())
}
