//! # Delimiter Policy
//!
//! A table file uses exactly one separator. The separator is configured
//! explicitly; `Detect` keeps the old best-effort heuristic for files of
//! unknown provenance:
//!
//! 1. a tab on the header line selects tab,
//! 2. otherwise a run of two or more whitespace characters selects
//!    "runs of >= 2 whitespace",
//! 3. otherwise any whitespace run separates cells.
//!
//! Values containing embedded double spaces can mis-split under `Detect`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{TableError, TableResult};

fn multi_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("static regex"))
}

/// Configured separator for a table file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    /// Tab separated
    Tab,
    /// Any fixed single character
    Char(char),
    /// Legacy heuristic, decided from the header line
    Detect,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Tab
    }
}

impl Delimiter {
    /// Parse a config setting: `tab`, `detect`, or a single character
    pub fn from_setting(setting: &str) -> TableResult<Self> {
        match setting {
            "tab" | "\t" => Ok(Delimiter::Tab),
            "detect" => Ok(Delimiter::Detect),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c != '\n' && c != '\r' => Ok(Delimiter::Char(c)),
                    _ => Err(TableError::InvalidDelimiter(other.to_string())),
                }
            }
        }
    }

    /// Choose how lines of a file are split, given its header line
    pub fn splitter_for(&self, header_line: &str) -> Splitter {
        match self {
            Delimiter::Tab => Splitter::Exact('\t'),
            Delimiter::Char(c) => Splitter::Exact(*c),
            Delimiter::Detect => {
                if header_line.contains('\t') {
                    Splitter::Exact('\t')
                } else if multi_space().is_match(header_line.trim()) {
                    Splitter::MultiSpace
                } else {
                    Splitter::Whitespace
                }
            }
        }
    }

    /// Delimiter for read-only views over files that may predate the
    /// configured one. Tab-separated and unknown files fall back to
    /// `Detect`; a custom character is kept so its columns still split.
    pub fn lenient(self) -> Self {
        match self {
            Delimiter::Char(c) => Delimiter::Char(c),
            Delimiter::Tab | Delimiter::Detect => Delimiter::Detect,
        }
    }

    /// Separator written on save. `Detect` files are written tab separated.
    pub fn write_char(&self) -> char {
        match self {
            Delimiter::Tab | Delimiter::Detect => '\t',
            Delimiter::Char(c) => *c,
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Delimiter::from_setting(&value)
    }
}

impl From<Delimiter> for String {
    fn from(value: Delimiter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Char(c) => write!(f, "{}", c),
            Delimiter::Detect => write!(f, "detect"),
        }
    }
}

/// Concrete splitting rule chosen for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splitter {
    Exact(char),
    MultiSpace,
    Whitespace,
}

impl Splitter {
    /// Split a line into trimmed cells
    pub fn split(&self, line: &str) -> Vec<String> {
        match self {
            Splitter::Exact(c) => line.split(*c).map(|s| s.trim().to_string()).collect(),
            Splitter::MultiSpace => multi_space()
                .split(line.trim())
                .map(|s| s.trim().to_string())
                .collect(),
            Splitter::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_keeps_custom_char() {
        assert_eq!(Delimiter::Tab.lenient(), Delimiter::Detect);
        assert_eq!(Delimiter::Detect.lenient(), Delimiter::Detect);
        assert_eq!(Delimiter::Char(',').lenient(), Delimiter::Char(','));
    }

    #[test]
    fn test_from_setting() {
        assert_eq!(Delimiter::from_setting("tab").unwrap(), Delimiter::Tab);
        assert_eq!(Delimiter::from_setting("detect").unwrap(), Delimiter::Detect);
        assert_eq!(Delimiter::from_setting(",").unwrap(), Delimiter::Char(','));
        assert!(Delimiter::from_setting(",,").is_err());
        assert!(Delimiter::from_setting("").is_err());
        assert!(Delimiter::from_setting("\n").is_err());
    }

    #[test]
    fn test_detect_prefers_tab() {
        let splitter = Delimiter::Detect.splitter_for("id\tname  here");
        assert_eq!(splitter, Splitter::Exact('\t'));
    }

    #[test]
    fn test_detect_multi_space() {
        let splitter = Delimiter::Detect.splitter_for("id  full name  class");
        assert_eq!(splitter, Splitter::MultiSpace);
        assert_eq!(
            splitter.split("1  Jane Doe  10A"),
            vec!["1", "Jane Doe", "10A"]
        );
    }

    #[test]
    fn test_detect_single_space_falls_back_to_whitespace() {
        let splitter = Delimiter::Detect.splitter_for("id name class");
        assert_eq!(splitter, Splitter::Whitespace);
        assert_eq!(splitter.split(" 1 Jane   10A "), vec!["1", "Jane", "10A"]);
    }

    #[test]
    fn test_exact_split_trims_cells() {
        let splitter = Splitter::Exact(',');
        assert_eq!(splitter.split(" a , b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_serde_uses_setting_strings() {
        let d: Delimiter = serde_json::from_str("\"detect\"").unwrap();
        assert_eq!(d, Delimiter::Detect);
        assert_eq!(serde_json::to_string(&Delimiter::Char(';')).unwrap(), "\";\"");
        assert!(serde_json::from_str::<Delimiter>("\"ab\"").is_err());
    }

    #[test]
    fn test_write_char() {
        assert_eq!(Delimiter::Detect.write_char(), '\t');
        assert_eq!(Delimiter::Char('|').write_char(), '|');
    }
}
