//! # Auth Module
//!
//! Username/password accounts, password digests, roles and server-side
//! sessions.

pub mod crypto;
pub mod errors;
pub mod service;
pub mod session;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use service::{require_role, AuthService};
pub use session::{InMemorySessionStore, Session, SessionConfig, SessionManager, SessionStore, SessionUser};
pub use user::{InMemoryUserRepository, JsonFileUserRepository, Role, User, UserRepository};
