//! # HTTP Server Module
//!
//! Server-rendered pages over axum.
//!
//! # Endpoints
//!
//! - `/` landing page, `/dashboard`, `/admin`
//! - `/register`, `/login`, `/logout`
//! - `/database` students, subjects and marks
//! - `/contact`, `/messages`
//! - `/crud`, `/crud/add`, `/crud/update/:id`, `/crud/delete/:id`
//! - `/health`
//! - `/public/*` static assets

pub mod auth_routes;
pub mod config;
pub mod contact_routes;
pub mod crud_routes;
pub mod database_routes;
pub mod errors;
pub mod health_routes;
pub mod page_routes;
pub mod server;
pub mod session;
pub mod state;
pub mod views;

pub use config::HttpServerConfig;
pub use errors::{AppError, AppResult};
pub use server::HttpServer;
pub use session::SessionContext;
pub use state::AppState;
