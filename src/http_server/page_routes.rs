//! Page routes: landing page, dashboard and admin area

use std::sync::Arc;

use axum::{response::Html, routing::get, Router};

use crate::auth::{require_role, AuthError, Role};

use super::errors::AppResult;
use super::session::SessionContext;
use super::state::AppState;
use super::views;

pub fn page_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/admin", get(admin_handler))
        .with_state(state)
}

async fn landing_handler(session: SessionContext) -> Html<String> {
    Html(views::landing(session.user()))
}

/// Any logged-in user; anonymous visitors go to the login page
async fn dashboard_handler(session: SessionContext) -> AppResult<Html<String>> {
    let user = session.user().ok_or(AuthError::AuthenticationRequired)?;
    Ok(Html(views::dashboard(user)))
}

/// Admins only; anyone else, logged in or not, gets 403
async fn admin_handler(session: SessionContext) -> AppResult<Html<String>> {
    const DENIED: &str = "Admins only.";
    let user = session
        .user()
        .ok_or_else(|| AuthError::AccessDenied(DENIED.to_string()))?;
    let user = require_role(Some(user), &[Role::Admin], DENIED)?;
    Ok(Html(views::admin_page(user)))
}
