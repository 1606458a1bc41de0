//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

use crate::json_store::JsonStoreError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Validation Errors
    // ==================

    /// A required form field was empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Username already registered
    #[error("Username already exists!")]
    DuplicateUsername,

    // ==================
    // Authentication Errors
    // ==================

    /// Unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid username or password!")]
    InvalidCredentials,

    /// No live session for this request
    #[error("Authentication required")]
    AuthenticationRequired,

    // ==================
    // Authorization Errors
    // ==================

    /// Logged in, but the role does not open this page
    #[error("Access denied. {0}")]
    AccessDenied(String),

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingField(_) => 400,
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,
            AuthError::AccessDenied(_) => 403,
            AuthError::DuplicateUsername => 409,
            AuthError::HashingFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Whether the error is the caller's fault and can be shown on the form
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<JsonStoreError> for AuthError {
    fn from(err: JsonStoreError) -> Self {
        AuthError::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::AccessDenied("Admins only.".into()).status_code(), 403);
        assert_eq!(AuthError::DuplicateUsername.status_code(), 409);
        assert_eq!(AuthError::StorageError("disk".into()).status_code(), 500);
    }

    #[test]
    fn test_invalid_credentials_does_not_say_which_part() {
        let msg = AuthError::InvalidCredentials.to_string();
        assert_eq!(msg, "Invalid username or password!");
    }

    #[test]
    fn test_client_errors() {
        assert!(AuthError::MissingField("Username").is_client_error());
        assert!(!AuthError::HashingFailed.is_client_error());
    }
}
