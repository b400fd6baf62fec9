use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Admin login required")]
    Unauthorized,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session error")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Guarded routes normally never get here; the admin middleware redirects first.
            AppError::Unauthorized => {
                return (StatusCode::SEE_OTHER, [(header::LOCATION, "/login")]).into_response();
            }
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Session(_) => StatusCode::BAD_REQUEST,
            AppError::OrmError(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = format!(
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>{status}</title></head>\
             <body><h1>{status}</h1><p>{self}</p></body></html>"
        );
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
