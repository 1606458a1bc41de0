//! # HTTP Server
//!
//! Combines every page router into one axum app.

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::contact_routes::contact_routes;
use super::crud_routes::crud_routes;
use super::database_routes::database_routes;
use super::health_routes::health_routes;
use super::page_routes::page_routes;
use super::state::AppState;

/// HTTP server for the school site
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over prepared state
    pub fn new(state: Arc<AppState>) -> Self {
        let config = state.config().server.clone();
        let router = Self::build_router(state, &config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(state: Arc<AppState>, config: &HttpServerConfig) -> Router {
        let router = Router::new()
            .merge(health_routes(state.clone()))
            .merge(page_routes(state.clone()))
            .merge(auth_routes(state.clone()))
            .merge(database_routes(state.clone()))
            .merge(contact_routes(state.clone()))
            .merge(crud_routes(state))
            .nest_service("/public", ServeDir::new(&config.public_dir))
            .layer(TraceLayer::new_for_http());

        if config.cors_origins.is_empty() {
            return router;
        }

        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("Server running at http://{}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
