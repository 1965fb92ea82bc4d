//! Position types for reporting source locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line and 1-based column, as shown to users in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Build a position from a 1-based line and a 0-based column, the
    /// convention used by ESTree `loc` spans.
    #[must_use]
    pub const fn from_zero_based_column(line: u32, column: u32) -> Self {
        Self {
            line,
            column: column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, column {}", self.line, self.column)
    }
}
