//! Source locations carried by tree nodes
//!
//!     Lines and columns are 1-based, matching what editors display. The file name is
//!     optional: trees built from strings or by hand have none, and print as
//!     `<unknown file>`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_FILE: &str = "<unknown file>";

/// Represents a position in source code (line and column)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    pub fn in_file(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    pub fn file_name(&self) -> &str {
        self.file.as_deref().unwrap_or(UNKNOWN_FILE)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.line, self.column)
    }
}

/// Render an optional location the way diagnostics print it.
pub fn describe(location: Option<&Location>) -> String {
    match location {
        Some(location) => location.to_string(),
        None => format!("{}:-1:-1", UNKNOWN_FILE),
    }
}
