//! # Contact Errors

use thiserror::Error;

use crate::json_store::JsonStoreError;

pub type ContactResult<T> = Result<T, ContactError>;

#[derive(Debug, Error)]
pub enum ContactError {
    /// Name, email or message left blank
    #[error("All fields are required.")]
    MissingFields,

    #[error("Storage error: {0}")]
    Storage(#[from] JsonStoreError),
}

impl ContactError {
    pub fn status_code(&self) -> u16 {
        match self {
            ContactError::MissingFields => 400,
            ContactError::Storage(_) => 500,
        }
    }
}
