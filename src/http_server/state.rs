//! Shared router state
//!
//! Built once at boot from the configuration and handed to every handler.
//! It holds services, not data: tables and JSON files are read fresh on
//! every request.

use std::sync::Arc;

use crate::auth::{AuthResult, AuthService, InMemorySessionStore, JsonFileUserRepository, SessionConfig};
use crate::config::AppConfig;
use crate::contact::{ContactService, JsonFileMessageRepository};
use crate::students::StudentService;
use crate::table::TextFileBackend;

pub type FileAuthService = AuthService<JsonFileUserRepository, InMemorySessionStore>;

pub struct AppState {
    pub auth: FileAuthService,
    pub contact: ContactService<JsonFileMessageRepository>,
    pub students: StudentService<TextFileBackend>,
    /// Same files as `students`, read leniently for the read-only records
    /// page
    pub records: TextFileBackend,
    config: AppConfig,
}

impl AppState {
    /// Wire services from configuration and make sure the bootstrap admin
    /// account exists
    pub fn from_config(config: AppConfig) -> AuthResult<Arc<Self>> {
        let auth = AuthService::new(
            JsonFileUserRepository::new(config.users_path()),
            InMemorySessionStore::new(),
            SessionConfig {
                ttl: config.session_ttl(),
            },
        );
        auth.ensure_default_admin(&config.admin_username, &config.admin_password)?;

        let tables = TextFileBackend::new(&config.data_dir, config.delimiter, config.empty_save);
        let records = tables.with_delimiter(config.delimiter.lenient());

        Ok(Arc::new(Self {
            auth,
            contact: ContactService::new(JsonFileMessageRepository::new(config.contacts_path())),
            students: StudentService::new(tables),
            records,
            config,
        }))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.server.cookie_name
    }

    pub fn session_max_age_secs(&self) -> i64 {
        self.config.session_ttl().num_seconds()
    }
}
