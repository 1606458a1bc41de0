//! Read-only database page over the students, subjects and marks files

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};

use crate::students::load_school_tables;

use super::errors::AppResult;
use super::session::SessionContext;
use super::state::AppState;
use super::views;

pub fn database_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/database", get(database_handler))
        .with_state(state)
}

async fn database_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> AppResult<Html<String>> {
    let tables = load_school_tables(&state.records)?;
    Ok(Html(views::database_page(session.user(), &tables)))
}
