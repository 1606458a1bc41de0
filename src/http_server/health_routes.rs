//! `/health`: liveness plus a check that the data directory is reachable.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub data_dir: bool,
}

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Health>) {
    let data_dir = state.config().data_dir.is_dir();
    let (status, label) = if data_dir {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(Health {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            data_dir,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_degraded_when_data_dir_disappears() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("db");
        let state = AppState::from_config(AppConfig {
            data_dir: data_dir.clone(),
            ..AppConfig::default()
        })
        .unwrap();

        let (status, Json(health)) = health_handler(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(health.data_dir);

        fs::remove_dir_all(&data_dir).unwrap();
        let (status, Json(health)) = health_handler(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(health.status, "degraded");
    }
}
