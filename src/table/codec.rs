//! # Text Codec
//!
//! Parses and renders the delimited text format: one header line, then one
//! line per record. Blank lines are ignored on read.

use super::delimiter::Delimiter;
use super::table::Table;

/// Parse file contents into a table.
///
/// Blank input yields [`Table::empty`].
pub fn parse(text: &str, delimiter: Delimiter) -> Table {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Table::empty();
    };

    let splitter = delimiter.splitter_for(header_line);
    let headers = splitter.split(header_line);
    let rows = lines.map(|line| splitter.split(line)).collect();

    Table::from_cells(headers, rows)
}

/// Render a table back to text, header line first, newline terminated.
///
/// A cell can't carry the separator or a line break; those are written as
/// a single space so the file stays parseable.
pub fn render(table: &Table, delimiter: Delimiter) -> String {
    let sep = delimiter.write_char();
    let mut out = String::new();

    push_line(&mut out, table.headers().iter().map(String::as_str), sep);
    for row in table.rows() {
        push_line(&mut out, row.values(), sep);
    }

    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, sep: char) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.extend(cell.chars().map(|c| match c {
            '\n' | '\r' => ' ',
            c if c == sep => ' ',
            c => c,
        }));
    }
    out.push('\n');
}
