//! # Students Module
//!
//! The student register and the read-only school records view.

pub mod records;
pub mod service;

pub use records::{load_school_tables, SchoolTables};
pub use service::{StudentForm, StudentService};

pub const STUDENTS_TABLE: &str = "students.txt";
pub const SUBJECTS_TABLE: &str = "subjects.txt";
pub const MARKS_TABLE: &str = "marks.txt";

/// Key field of the student table
pub const STUDENT_KEY: &str = "id";

pub const STUDENT_HEADERS: [&str; 4] = ["id", "name", "class", "sex"];
pub const SUBJECT_HEADERS: [&str; 2] = ["id", "name"];
pub const MARK_HEADERS: [&str; 3] = ["student_id", "subject_id", "mark"];
