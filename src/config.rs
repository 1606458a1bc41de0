//! Application configuration
//!
//! One JSON file; every field is optional and falls back to a default.
//!
//! ```json
//! {
//!   "data_dir": "db",
//!   "session_ttl_minutes": 1440,
//!   "delimiter": "tab",
//!   "empty_save": "headers",
//!   "admin_username": "admin",
//!   "admin_password": "admin",
//!   "server": { "host": "0.0.0.0", "port": 4000 }
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::table::{Delimiter, EmptySavePolicy};

pub const USERS_FILE: &str = "users.json";
pub const CONTACTS_FILE: &str = "contacts.json";

/// Longest accepted session lifetime: ten years
pub const MAX_SESSION_TTL_MINUTES: i64 = 10 * 366 * 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding users, contacts and the record tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Session lifetime in minutes (default: one day)
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,

    /// Separator of the student table: "tab", "detect" or one character
    #[serde(default)]
    pub delimiter: Delimiter,

    /// "headers" writes a header-only file when the last row goes;
    /// "skip" leaves the file untouched
    #[serde(default)]
    pub empty_save: EmptySavePolicy,

    /// Bootstrap admin account, created at startup if missing
    #[serde(default = "default_admin")]
    pub admin_username: String,

    #[serde(default = "default_admin")]
    pub admin_password: String,

    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("db")
}

fn default_session_ttl_minutes() -> i64 {
    24 * 60
}

fn default_admin() -> String {
    "admin".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_ttl_minutes: default_session_ttl_minutes(),
            delimiter: Delimiter::default(),
            empty_save: EmptySavePolicy::default(),
            admin_username: default_admin(),
            admin_password: default_admin(),
            server: HttpServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Like [`AppConfig::load`], but a missing file means all defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            _ => Self::load(path),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.session_ttl_minutes) {
            return Err(ConfigError::Invalid(format!(
                "session_ttl_minutes must be between 1 and {}",
                MAX_SESSION_TTL_MINUTES
            )));
        }
        if self.admin_username.is_empty() || self.admin_password.is_empty() {
            return Err(ConfigError::Invalid(
                "admin_username and admin_password must not be empty".into(),
            ));
        }
        if !self.server.cookie_name_is_valid() {
            return Err(ConfigError::Invalid(format!(
                "cookie_name '{}' must be alphanumeric, '_' or '-'",
                self.server.cookie_name
            )));
        }
        Ok(())
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.data_dir.join(CONTACTS_FILE)
    }

    /// Session lifetime, clamped to the accepted range
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES))
    }
}
