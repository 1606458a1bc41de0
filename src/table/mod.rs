//! # Flat-Record Store
//!
//! A table is a delimiter-separated text file: a header line, then one
//! record per line. Every operation loads the whole file, mutates the
//! in-memory [`Table`] and writes the whole file back.

pub mod backend;
pub mod codec;
pub mod delimiter;
pub mod errors;
pub mod record;
#[allow(clippy::module_inception)]
pub mod table;

pub use backend::{EmptySavePolicy, InMemoryTableBackend, TableBackend, TextFileBackend};
pub use delimiter::Delimiter;
pub use errors::{TableError, TableResult};
pub use record::Record;
pub use table::Table;
