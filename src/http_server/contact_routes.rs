//! Contact form and message inbox routes

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::auth::{require_role, Role};
use crate::contact::{ContactError, ContactForm};

use super::errors::AppResult;
use super::session::SessionContext;
use super::state::AppState;
use super::views;

pub fn contact_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contact", get(contact_form).post(contact_handler))
        .route("/messages", get(messages_handler))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl From<ContactRequest> for ContactForm {
    fn from(req: ContactRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        }
    }
}

async fn contact_form(session: SessionContext) -> Html<String> {
    Html(views::contact_page(session.user(), ""))
}

async fn contact_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Form(request): Form<ContactRequest>,
) -> AppResult<Response> {
    match state.contact.submit(request.into()) {
        Ok(_) => Ok(Html(views::contact_page(session.user(), "Message sent successfully!")).into_response()),
        Err(e @ ContactError::MissingFields) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::contact_page(session.user(), &e.to_string())),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Registered users and admins; anonymous visitors are sent to log in
async fn messages_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> AppResult<Html<String>> {
    let user = require_role(
        session.user(),
        &[Role::Registered, Role::Admin],
        "You must be registered or admin.",
    )?;
    let messages = state.contact.list_newest_first()?;
    Ok(Html(views::messages_page(user, &messages)))
}
