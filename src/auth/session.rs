//! # Session Management
//!
//! Server-side sessions keyed by an opaque token. The client holds the raw
//! token in a cookie; the store only ever sees its SHA-256 hash.
//!
//! ## Invariants
//! - A session is valid until `expires_at`, then treated as absent
//! - Logout removes the session immediately

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};
use super::errors::{AuthError, AuthResult};
use super::user::{Role, User};

/// Session model
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn user(&self) -> SessionUser {
        SessionUser {
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// The logged-in user as seen by request handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
        }
    }
}

/// Session store trait, keyed by token hash
pub trait SessionStore: Send + Sync {
    fn insert(&self, token_hash: String, session: Session) -> AuthResult<()>;

    fn get(&self, token_hash: &str) -> AuthResult<Option<Session>>;

    /// Remove a session; returns whether one existed
    fn remove(&self, token_hash: &str) -> AuthResult<bool>;

    /// Drop every session expired at `now`; returns how many went
    fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<usize>;
}

/// Session store held in process memory
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::StorageError("Lock poisoned".to_string())
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, token_hash: String, session: Session) -> AuthResult<()> {
        self.sessions.write().map_err(poisoned)?.insert(token_hash, session);
        Ok(())
    }

    fn get(&self, token_hash: &str) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().map_err(poisoned)?.get(token_hash).cloned())
    }

    fn remove(&self, token_hash: &str) -> AuthResult<bool> {
        Ok(self
            .sessions
            .write()
            .map_err(poisoned)?
            .remove(token_hash)
            .is_some())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<usize> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok(before - sessions.len())
    }
}

/// Session manager handles session creation and lookup
pub struct SessionManager<S: SessionStore> {
    config: SessionConfig,
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(config: SessionConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a session for `user`; returns the raw token for the cookie
    pub fn create_session(&self, user: &User) -> AuthResult<(Session, String)> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.config.ttl).ok_or_else(|| {
            AuthError::StorageError("Session lifetime out of range".to_string())
        })?;

        let token = generate_token();
        let session = Session {
            id: Uuid::new_v4(),
            username: user.username.clone(),
            role: user.role,
            created_at: now,
            expires_at,
        };

        self.store.insert(hash_token(&token), session.clone())?;
        Ok((session, token))
    }

    /// Look up a live session by raw token. Expired sessions are removed
    /// and reported as absent.
    pub fn resolve(&self, token: &str) -> AuthResult<Option<Session>> {
        let token_hash = hash_token(token);
        let Some(session) = self.store.get(&token_hash)? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.store.remove(&token_hash)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// End a session. Unknown tokens are fine.
    pub fn destroy(&self, token: &str) -> AuthResult<bool> {
        self.store.remove(&hash_token(token))
    }

    pub fn purge_expired(&self) -> AuthResult<usize> {
        self.store.purge_expired(Utc::now())
    }
}
