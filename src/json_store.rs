//! # JSON Array Files
//!
//! Whole-file persistence for small record lists: read the entire array,
//! change it in memory, write the entire array back.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// JSON file errors
#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON array file. Absent or blank files are an empty list.
pub fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, JsonStoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(JsonStoreError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    if data.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&data).map_err(|source| JsonStoreError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Overwrite a JSON array file, two-space indented
pub fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), JsonStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let json = serde_json::to_string_pretty(items).map_err(|source| JsonStoreError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    fs::write(path, json).map_err(io_err(path))
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> JsonStoreError {
    let path = path.display().to_string();
    move |source| JsonStoreError::Io { path, source }
}
