//! # Users
//!
//! User model and repositories. The file-backed repository keeps all
//! users in one JSON array and re-reads it on every call.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::json_store;

use super::crypto::{digest_password, verify_password};
use super::errors::{AuthError, AuthResult};

/// Role tag gating pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Registered,
    /// Any role string this server does not know; grants nothing
    #[serde(other)]
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Registered => "registered",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    /// One-way digest, never plaintext
    pub password: String,

    pub role: Role,
}

impl User {
    /// Create a user, digesting the password
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> AuthResult<Self> {
        Ok(Self {
            username: username.into(),
            password: digest_password(password)?,
            role,
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password)
    }
}

/// User repository trait
pub trait UserRepository: Send + Sync {
    /// All users in storage order
    fn list(&self) -> AuthResult<Vec<User>>;

    /// Find a user by exact username
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        Ok(self.list()?.into_iter().find(|u| u.username == username))
    }

    /// Add a user. Fails with `DuplicateUsername` without writing anything
    /// when the name is taken.
    fn create(&self, user: &User) -> AuthResult<()>;
}

/// Users stored as a pretty-printed JSON array in one file
#[derive(Debug, Clone)]
pub struct JsonFileUserRepository {
    path: PathBuf,
}

impl JsonFileUserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, users: &[User]) -> AuthResult<()> {
        Ok(json_store::write_array(&self.path, users)?)
    }
}

impl UserRepository for JsonFileUserRepository {
    fn list(&self) -> AuthResult<Vec<User>> {
        Ok(json_store::read_array(&self.path)?)
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.list()?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::DuplicateUsername);
        }
        users.push(user.clone());
        self.write_all(&users)
    }
}

/// In-memory user repository for testing
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn list(&self) -> AuthResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.clone())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::DuplicateUsername);
        }

        users.push(user.clone());
        Ok(())
    }
}
