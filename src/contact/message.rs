//! # Contact Messages
//!
//! Message model and repositories. Messages form an append-only log kept
//! as one JSON array.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::json_store::{self, JsonStoreError};

use super::errors::ContactResult;

/// A message left through the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    pub date: MessageDate,
}

/// When a message arrived.
///
/// New messages carry an RFC 3339 timestamp. Older inbox files hold
/// locale-formatted strings such as `10/17/2025, 3:04:05 PM`; those are
/// kept verbatim and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageDate {
    Parsed(DateTime<Utc>),
    Legacy(String),
}

impl MessageDate {
    pub fn now() -> Self {
        MessageDate::Parsed(Utc::now())
    }

    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        match self {
            MessageDate::Parsed(date) => Some(*date),
            MessageDate::Legacy(_) => None,
        }
    }

    /// Newest first; unparseable dates sort after every parsed one and
    /// compare equal among themselves
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        match (a.parsed(), b.parsed()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<DateTime<Utc>> for MessageDate {
    fn from(date: DateTime<Utc>) -> Self {
        MessageDate::Parsed(date)
    }
}

impl fmt::Display for MessageDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageDate::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S UTC")),
            MessageDate::Legacy(raw) => f.write_str(raw),
        }
    }
}

/// Message repository trait
pub trait MessageRepository: Send + Sync {
    /// All messages in storage (arrival) order
    fn list(&self) -> ContactResult<Vec<ContactMessage>>;

    fn append(&self, message: ContactMessage) -> ContactResult<()>;
}

/// Messages stored as a JSON array in one file
#[derive(Debug, Clone)]
pub struct JsonFileMessageRepository {
    path: PathBuf,
}

impl JsonFileMessageRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MessageRepository for JsonFileMessageRepository {
    fn list(&self) -> ContactResult<Vec<ContactMessage>> {
        Ok(json_store::read_array(&self.path)?)
    }

    fn append(&self, message: ContactMessage) -> ContactResult<()> {
        let mut messages = self.list()?;
        messages.push(message);
        Ok(json_store::write_array(&self.path, &messages)?)
    }
}

/// In-memory message repository for testing
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<ContactMessage>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> JsonStoreError {
    JsonStoreError::Io {
        path: "<memory>".to_string(),
        source: std::io::Error::other("lock poisoned"),
    }
}

impl MessageRepository for InMemoryMessageRepository {
    fn list(&self) -> ContactResult<Vec<ContactMessage>> {
        Ok(self.messages.read().map_err(poisoned)?.clone())
    }

    fn append(&self, message: ContactMessage) -> ContactResult<()> {
        self.messages.write().map_err(poisoned)?.push(message);
        Ok(())
    }
}
