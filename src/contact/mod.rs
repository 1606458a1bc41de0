//! # Contact Module
//!
//! Contact form submissions and the message inbox.

pub mod errors;
pub mod message;
pub mod service;

pub use errors::{ContactError, ContactResult};
pub use message::{
    ContactMessage, InMemoryMessageRepository, JsonFileMessageRepository, MessageDate,
    MessageRepository,
};
pub use service::{ContactForm, ContactService};
