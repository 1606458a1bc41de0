//! Student CRUD routes. Open to everyone; every write redirects back to
//! the list.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::students::StudentForm;

use super::errors::AppResult;
use super::session::SessionContext;
use super::state::AppState;
use super::views;

pub fn crud_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/crud", get(list_handler))
        .route("/crud/add", post(add_handler))
        .route("/crud/update/:id", post(update_handler))
        .route("/crud/delete/:id", get(delete_handler))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub sex: String,
}

impl From<StudentRequest> for StudentForm {
    fn from(req: StudentRequest) -> Self {
        Self {
            name: req.name,
            class: req.class,
            sex: req.sex,
        }
    }
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> AppResult<Html<String>> {
    let students = state.students.list()?;
    Ok(Html(views::crud_page(session.user(), &students)))
}

async fn add_handler(
    State(state): State<Arc<AppState>>,
    Form(request): Form<StudentRequest>,
) -> AppResult<Redirect> {
    state.students.add(&request.into())?;
    Ok(Redirect::to("/crud"))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(request): Form<StudentRequest>,
) -> AppResult<Redirect> {
    state.students.update(&id, &request.into())?;
    Ok(Redirect::to("/crud"))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.students.delete(&id)?;
    Ok(Redirect::to("/crud"))
}
