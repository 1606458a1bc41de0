//! # School Records
//!
//! Read-only view over the students, subjects and marks tables.

use serde::Serialize;

use crate::table::{Table, TableBackend, TableResult};

use super::{MARKS_TABLE, STUDENTS_TABLE, SUBJECTS_TABLE};

/// The three record tables, as rendered on the database page
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchoolTables {
    pub students: Table,
    pub subjects: Table,
    pub marks: Table,
}

/// Load all three tables. Missing files show as empty tables.
pub fn load_school_tables<B: TableBackend + ?Sized>(backend: &B) -> TableResult<SchoolTables> {
    Ok(SchoolTables {
        students: backend.load(STUDENTS_TABLE)?,
        subjects: backend.load(SUBJECTS_TABLE)?,
        marks: backend.load(MARKS_TABLE)?,
    })
}
