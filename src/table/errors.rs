//! # Table Errors

use thiserror::Error;

/// Result type for flat table operations
pub type TableResult<T> = Result<T, TableError>;

/// Flat table errors
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// An existing key cell could not be parsed as a number while
    /// computing the next key
    #[error("Key field '{field}' holds non-numeric value '{value}'; auto-increment requires numeric keys")]
    NonNumericKey { field: String, value: String },

    /// Delimiter setting could not be understood
    #[error("Invalid delimiter setting: {0}")]
    InvalidDelimiter(String),

    /// Table name escapes the backend root or is otherwise unusable
    #[error("Invalid table name: {0}")]
    InvalidName(String),
}

impl TableError {
    pub(crate) fn io(path: impl Into<String>, err: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TableError::InvalidName(_) => 400,
            TableError::Io { .. } => 500,
            TableError::NonNumericKey { .. } => 500,
            TableError::InvalidDelimiter(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TableError::InvalidName("../x".into()).status_code(), 400);
        assert_eq!(
            TableError::NonNumericKey {
                field: "id".into(),
                value: "abc".into()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_non_numeric_key_message_names_field_and_value() {
        let err = TableError::NonNumericKey {
            field: "id".into(),
            value: "x7".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'id'"));
        assert!(msg.contains("'x7'"));
    }
}
