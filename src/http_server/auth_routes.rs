//! Auth HTTP Routes
//!
//! Register, login and logout forms. Validation failures re-render the
//! form with a message; success redirects.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::auth::AuthError;

use super::errors::AppResult;
use super::session::{clear_cookie, session_cookie, SessionContext};
use super::state::AppState;
use super::views;

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", get(register_form).post(register_handler))
        .route("/login", get(login_form).post(login_handler))
        .route("/logout", get(logout_handler))
        .with_state(state)
}

// ==================
// Request Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn rerender(err: &AuthError, page: String) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Html(page)).into_response()
}

// ==================
// Handlers
// ==================

async fn register_form(session: SessionContext) -> Html<String> {
    Html(views::register_page(session.user(), ""))
}

async fn register_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    match state.auth.register(&form.username, &form.password) {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(e) if e.is_client_error() => {
            let page = views::register_page(session.user(), &e.to_string());
            Ok(rerender(&e, page))
        }
        Err(e) => Err(e.into()),
    }
}

async fn login_form(session: SessionContext) -> Html<String> {
    Html(views::login_page(session.user(), ""))
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    match state.auth.login(&form.username, &form.password) {
        Ok((_, token)) => {
            if let Some(old) = &session.token {
                state.auth.logout(old)?;
            }
            let cookie = session_cookie(state.cookie_name(), &token, state.session_max_age_secs());
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response())
        }
        Err(e) if e.is_client_error() => {
            let page = views::login_page(session.user(), &e.to_string());
            Ok(rerender(&e, page))
        }
        Err(e) => Err(e.into()),
    }
}

async fn logout_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> AppResult<Response> {
    if let Some(token) = &session.token {
        state.auth.logout(token)?;
    }
    let cookie = clear_cookie(state.cookie_name());
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}
