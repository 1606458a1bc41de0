//! # Record
//!
//! One row of a flat table: an ordered field name to value mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered field name → cell value mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from pairs; a repeated field keeps the last value
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            record.set(k, v);
        }
        record
    }

    /// Build a record that holds exactly `headers`, taking values from
    /// `cells` by position. Missing cells are empty, extra cells dropped.
    pub fn from_cells(headers: &[String], cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();
        Self {
            fields: headers
                .iter()
                .map(|h| (h.clone(), cells.next().unwrap_or_default()))
                .collect(),
        }
    }

    /// Re-shape `source` onto `headers`: fields not in `headers` are
    /// dropped and missing ones become empty.
    pub fn conform(headers: &[String], source: &Record) -> Self {
        Self {
            fields: headers
                .iter()
                .map(|h| (h.clone(), source.get(h).unwrap_or_default().to_string()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values in field order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
