//! # Table
//!
//! Ordered headers plus ordered rows, loaded whole from one flat file.
//!
//! ## Invariants
//! - Every row holds exactly the fields named in `headers`
//! - Row order is file order; appends go to the end
//! - Key uniqueness is the caller's job, via [`Table::next_key`]

use serde::Serialize;

use super::errors::{TableError, TableResult};
use super::record::Record;

/// In-memory image of one flat file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// A table with no headers and no rows (missing or blank file)
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table with the given headers and no rows
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build from raw cells, padding short rows and truncating long ones
    pub fn from_cells(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|cells| Record::from_cells(&headers, cells))
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows (headers may still exist)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Append a record at the end, shaped to the table's headers
    pub fn append(&mut self, record: Record) {
        let row = Record::conform(&self.headers, &record);
        self.rows.push(row);
    }

    /// Next key for an auto-incremented numeric key field:
    /// one past the largest existing key, or `"1"` for an empty table.
    ///
    /// A key cell that is not a non-negative integer is reported as
    /// [`TableError::NonNumericKey`] rather than skipped.
    pub fn next_key(&self, key_field: &str) -> TableResult<String> {
        let mut max: Option<u64> = None;
        for row in &self.rows {
            let raw = row.get(key_field).unwrap_or_default();
            let value: u64 = raw.trim().parse().map_err(|_| TableError::NonNumericKey {
                field: key_field.to_string(),
                value: raw.to_string(),
            })?;
            max = Some(max.map_or(value, |m| m.max(value)));
        }
        Ok(max.map_or(1, |m| m.saturating_add(1)).to_string())
    }

    /// First row whose key field equals `key`
    pub fn find(&self, key_field: &str, key: &str) -> Option<&Record> {
        self.rows.iter().find(|r| r.get(key_field) == Some(key))
    }

    /// Replace every non-key field of the first matching row with the
    /// value from `new_fields` (empty when absent there).
    ///
    /// Returns whether a row matched. No match is not an error.
    pub fn update(&mut self, key_field: &str, key: &str, new_fields: &Record) -> bool {
        let Some(row) = self
            .rows
            .iter_mut()
            .find(|r| r.get(key_field) == Some(key))
        else {
            return false;
        };

        for header in &self.headers {
            if header == key_field {
                continue;
            }
            row.set(header.as_str(), new_fields.get(header).unwrap_or_default());
        }
        true
    }

    /// Remove every row whose key field equals `key`; returns how many went
    pub fn delete(&mut self, key_field: &str, key: &str) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| r.get(key_field) != Some(key));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Table {
        let mut table = Table::new(["id", "name", "class", "sex"]);
        table.append(Record::from_pairs([
            ("id", "1"),
            ("name", "Jane"),
            ("class", "10A"),
            ("sex", "F"),
        ]));
        table
    }

    #[test]
    fn test_next_key_empty_table() {
        let table = Table::new(["id", "name"]);
        assert_eq!(table.next_key("id").unwrap(), "1");
    }

    #[test]
    fn test_next_key_uses_max_not_last() {
        let mut table = Table::new(["id"]);
        for id in ["3", "7", "5"] {
            table.append(Record::from_pairs([("id", id)]));
        }
        assert_eq!(table.next_key("id").unwrap(), "8");
    }

    #[test]
    fn test_next_key_rejects_non_numeric() {
        let mut table = Table::new(["id"]);
        table.append(Record::from_pairs([("id", "1")]));
        table.append(Record::from_pairs([("id", "abc")]));
        let err = table.next_key("id").unwrap_err();
        assert!(matches!(err, TableError::NonNumericKey { ref value, .. } if value == "abc"));
    }

    #[test]
    fn test_append_example() {
        let mut table = students();
        let id = table.next_key("id").unwrap();
        let mut tom = Record::from_pairs([("name", "Tom"), ("class", "10B"), ("sex", "M")]);
        tom.set("id", id);
        table.append(tom);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get("id"), Some("2"));
        assert_eq!(
            table.rows()[1].fields().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["id", "name", "class", "sex"]
        );
    }

    #[test]
    fn test_update_replaces_non_key_fields() {
        let mut table = students();
        let changed = table.update("id", "1", &Record::from_pairs([("name", "Janet")]));
        assert!(changed);
        let row = table.find("id", "1").unwrap();
        assert_eq!(row.get("name"), Some("Janet"));
        assert_eq!(row.get("class"), Some(""));
        assert_eq!(row.get("id"), Some("1"));
    }

    #[test]
    fn test_update_ignores_key_in_new_fields() {
        let mut table = students();
        table.update("id", "1", &Record::from_pairs([("id", "99"), ("name", "X")]));
        assert!(table.find("id", "1").is_some());
        assert!(table.find("id", "99").is_none());
    }

    #[test]
    fn test_update_missing_key_is_noop() {
        let mut table = students();
        let before = table.clone();
        assert!(!table.update("id", "42", &Record::from_pairs([("name", "Nobody")])));
        assert_eq!(table, before);
    }

    #[test]
    fn test_delete_zero_and_many() {
        let mut table = students();
        let before = table.clone();
        assert_eq!(table.delete("id", "42"), 0);
        assert_eq!(table, before);

        table.append(Record::from_pairs([("id", "1"), ("name", "Dup")]));
        table.append(Record::from_pairs([("id", "2"), ("name", "Keep")]));
        assert_eq!(table.delete("id", "1"), 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].get("name"), Some("Keep"));
    }
}
