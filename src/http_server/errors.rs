//! HTTP error mapping
//!
//! Validation failures are normally caught by handlers and shown on the
//! form. Whatever reaches this type aborts the request: access problems
//! become 403 or a redirect to the login page, storage problems a 500.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::contact::ContactError;
use crate::table::TableError;

use super::views;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Contact(#[from] ContactError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            AppError::Auth(e) => e.status_code(),
            AppError::Table(e) => e.status_code(),
            AppError::Contact(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        match self {
            AppError::Auth(AuthError::AuthenticationRequired) => {
                Redirect::to("/login").into_response()
            }
            AppError::Auth(AuthError::AccessDenied(message)) => {
                (status, Html(views::access_denied(&message))).into_response()
            }
            other => (status, Html(views::error_page(status, &other.to_string()))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(AuthError::DuplicateUsername).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(TableError::InvalidDelimiter("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ContactError::MissingFields).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_authentication_required_redirects_to_login() {
        let response = AppError::from(AuthError::AuthenticationRequired).into_response();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[test]
    fn test_access_denied_is_forbidden() {
        let response =
            AppError::from(AuthError::AccessDenied("Admins only.".into())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
