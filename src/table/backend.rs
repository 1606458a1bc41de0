//! # Table Backends
//!
//! Storage strategy behind the flat-record store. Every call is a whole
//! table: `load` reads everything, `save` rewrites everything. Nothing is
//! cached between calls and nothing is locked; two concurrent writers race
//! and the last write wins.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec;
use super::delimiter::Delimiter;
use super::errors::{TableError, TableResult};
use super::table::Table;

/// What `save` does with a table that has no rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptySavePolicy {
    /// Write the header line alone
    #[default]
    #[serde(rename = "headers")]
    WriteHeaders,
    /// Leave the file untouched
    #[serde(rename = "skip")]
    SkipWhenEmpty,
}

/// Backend trait for flat tables
pub trait TableBackend: Send + Sync + std::fmt::Debug {
    /// Load a whole table. A missing table is an empty one.
    fn load(&self, name: &str) -> TableResult<Table>;

    /// Replace a whole table
    fn save(&self, name: &str, table: &Table) -> TableResult<()>;
}

/// Read a delimited file. Absent or blank files give an empty table.
pub fn load(path: &Path, delimiter: Delimiter) -> TableResult<Table> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(codec::parse(&text, delimiter)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::empty()),
        Err(e) => Err(TableError::io(path.display().to_string(), e)),
    }
}

/// Overwrite a delimited file with the full table.
///
/// Returns whether anything was written.
pub fn save(
    path: &Path,
    table: &Table,
    delimiter: Delimiter,
    policy: EmptySavePolicy,
) -> TableResult<bool> {
    if !should_write(table, policy) {
        debug!(path = %path.display(), "skipping save of empty table");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TableError::io(parent.display().to_string(), e))?;
    }

    fs::write(path, codec::render(table, delimiter))
        .map_err(|e| TableError::io(path.display().to_string(), e))?;
    Ok(true)
}

fn should_write(table: &Table, policy: EmptySavePolicy) -> bool {
    if !table.is_empty() {
        return true;
    }
    table.has_headers() && policy == EmptySavePolicy::WriteHeaders
}

/// Delimited text files under a root directory, one file per table
#[derive(Debug, Clone)]
pub struct TextFileBackend {
    root: PathBuf,
    delimiter: Delimiter,
    empty_save: EmptySavePolicy,
}

impl TextFileBackend {
    pub fn new(root: impl Into<PathBuf>, delimiter: Delimiter, empty_save: EmptySavePolicy) -> Self {
        Self {
            root: root.into(),
            delimiter,
            empty_save,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Same files, read with a different delimiter policy
    pub fn with_delimiter(&self, delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..self.clone()
        }
    }

    fn full_path(&self, name: &str) -> TableResult<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.contains('\0');
        if !valid {
            return Err(TableError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl TableBackend for TextFileBackend {
    fn load(&self, name: &str) -> TableResult<Table> {
        let path = self.full_path(name)?;
        let table = load(&path, self.delimiter)?;
        debug!(table = name, rows = table.len(), "loaded table");
        Ok(table)
    }

    fn save(&self, name: &str, table: &Table) -> TableResult<()> {
        let path = self.full_path(name)?;
        if save(&path, table, self.delimiter, self.empty_save)? {
            debug!(table = name, rows = table.len(), "saved table");
        }
        Ok(())
    }
}

/// In-memory backend for tests
#[derive(Debug, Default)]
pub struct InMemoryTableBackend {
    tables: RwLock<HashMap<String, Table>>,
    empty_save: EmptySavePolicy,
}

impl InMemoryTableBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(empty_save: EmptySavePolicy) -> Self {
        Self {
            tables: RwLock::default(),
            empty_save,
        }
    }

    /// Number of tables that have been written
    pub fn table_count(&self) -> usize {
        self.tables.read().map(|t| t.len()).unwrap_or(0)
    }
}

impl TableBackend for InMemoryTableBackend {
    fn load(&self, name: &str) -> TableResult<Table> {
        let tables = self
            .tables
            .read()
            .map_err(|_| TableError::io(name, std::io::Error::other("lock poisoned")))?;
        Ok(tables.get(name).cloned().unwrap_or_default())
    }

    fn save(&self, name: &str, table: &Table) -> TableResult<()> {
        if !should_write(table, self.empty_save) {
            return Ok(());
        }
        let mut tables = self
            .tables
            .write()
            .map_err(|_| TableError::io(name, std::io::Error::other("lock poisoned")))?;
        tables.insert(name.to_string(), table.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record::Record;
    use tempfile::TempDir;

    fn backend(temp: &TempDir, policy: EmptySavePolicy) -> TextFileBackend {
        TextFileBackend::new(temp.path(), Delimiter::Tab, policy)
    }

    fn one_row() -> Table {
        let mut table = Table::new(["id", "name"]);
        table.append(Record::from_pairs([("id", "1"), ("name", "Jane")]));
        table
    }

    #[test]
    fn test_missing_file_is_empty_table() {
        let temp = TempDir::new().unwrap();
        let table = backend(&temp, EmptySavePolicy::default())
            .load("students.txt")
            .unwrap();
        assert_eq!(table, Table::empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp, EmptySavePolicy::default());
        backend.save("students.txt", &one_row()).unwrap();
        assert_eq!(backend.load("students.txt").unwrap(), one_row());
    }

    #[test]
    fn test_skip_policy_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp, EmptySavePolicy::SkipWhenEmpty);
        backend.save("students.txt", &one_row()).unwrap();

        let mut table = backend.load("students.txt").unwrap();
        table.delete("id", "1");
        backend.save("students.txt", &table).unwrap();

        assert_eq!(backend.load("students.txt").unwrap().len(), 1);
    }

    #[test]
    fn test_write_headers_policy_persists_last_delete() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp, EmptySavePolicy::WriteHeaders);
        backend.save("students.txt", &one_row()).unwrap();

        let mut table = backend.load("students.txt").unwrap();
        table.delete("id", "1");
        backend.save("students.txt", &table).unwrap();

        let text = fs::read_to_string(temp.path().join("students.txt")).unwrap();
        assert_eq!(text, "id\tname\n");
        let reloaded = backend.load("students.txt").unwrap();
        assert_eq!(reloaded.headers(), ["id", "name"]);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_headerless_empty_table_never_written() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp, EmptySavePolicy::WriteHeaders);
        backend.save("x.txt", &Table::empty()).unwrap();
        assert!(!temp.path().join("x.txt").exists());
    }

    #[test]
    fn test_rejects_path_escape() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp, EmptySavePolicy::default());
        for name in ["../etc", "a/b", "", ".."] {
            assert!(matches!(
                backend.load(name),
                Err(TableError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn test_in_memory_backend() {
        let backend = InMemoryTableBackend::new();
        assert_eq!(backend.load("t").unwrap(), Table::empty());
        backend.save("t", &one_row()).unwrap();
        assert_eq!(backend.load("t").unwrap(), one_row());
        assert_eq!(backend.table_count(), 1);
    }
}
