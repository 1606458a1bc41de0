//! # Student Register
//!
//! CRUD over the student table. Every call loads the table from the
//! backend, changes it and saves it back; nothing is cached.

use tracing::info;

use crate::table::{Record, Table, TableBackend, TableResult};

use super::{STUDENTS_TABLE, STUDENT_HEADERS, STUDENT_KEY};

/// Editable student fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub class: String,
    pub sex: String,
}

impl StudentForm {
    fn to_record(&self) -> Record {
        Record::from_pairs([
            ("name", self.name.as_str()),
            ("class", self.class.as_str()),
            ("sex", self.sex.as_str()),
        ])
    }
}

/// Student CRUD on top of a table backend
pub struct StudentService<B: TableBackend> {
    backend: B,
}

impl<B: TableBackend> StudentService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load(&self) -> TableResult<Table> {
        let table = self.backend.load(STUDENTS_TABLE)?;
        if table.has_headers() {
            Ok(table)
        } else {
            Ok(Table::new(STUDENT_HEADERS))
        }
    }

    /// The whole student table
    pub fn list(&self) -> TableResult<Table> {
        self.load()
    }

    /// Add a student under the next free id; returns that id
    pub fn add(&self, form: &StudentForm) -> TableResult<String> {
        let mut table = self.load()?;
        let id = table.next_key(STUDENT_KEY)?;

        let mut record = form.to_record();
        record.set(STUDENT_KEY, id.as_str());
        table.append(record);

        self.backend.save(STUDENTS_TABLE, &table)?;
        info!(id = %id, "student added");
        Ok(id)
    }

    /// Replace a student's fields. Unknown ids are ignored.
    pub fn update(&self, id: &str, form: &StudentForm) -> TableResult<bool> {
        let mut table = self.load()?;
        if !table.update(STUDENT_KEY, id, &form.to_record()) {
            return Ok(false);
        }

        self.backend.save(STUDENTS_TABLE, &table)?;
        info!(id, "student updated");
        Ok(true)
    }

    /// Remove every student with this id; returns how many went
    pub fn delete(&self, id: &str) -> TableResult<usize> {
        let mut table = self.load()?;
        let removed = table.delete(STUDENT_KEY, id);
        if removed == 0 {
            return Ok(0);
        }

        self.backend.save(STUDENTS_TABLE, &table)?;
        info!(id, removed, "student deleted");
        Ok(removed)
    }
}
