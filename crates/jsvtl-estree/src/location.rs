//! ESTree `loc` spans.

use jsvtl_common::Position;
use serde::Deserialize;

/// A line/column pair as written by ESTree parsers: `line` is 1-based,
/// `column` is 0-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

/// The `loc` field of an ESTree node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceLocation {
    pub start: SourcePosition,
    pub end: SourcePosition,
    #[serde(default)]
    pub source: Option<String>,
}

impl SourceLocation {
    /// Location spanning `(line, column)` to itself. `column` is 0-based.
    #[must_use]
    pub const fn at(line: u32, column: u32) -> Self {
        let pos = SourcePosition { line, column };
        Self {
            start: pos,
            end: pos,
            source: None,
        }
    }

    /// Start of the span converted to a reporting position (1-based column).
    #[must_use]
    pub const fn start_position(&self) -> Position {
        Position::from_zero_based_column(self.start.line, self.start.column)
    }
}

/// Nodes that may carry a source location.
pub trait Located {
    fn loc(&self) -> Option<&SourceLocation>;

    /// Start position for diagnostics, if the parser recorded one.
    fn position(&self) -> Option<Position> {
        self.loc().map(SourceLocation::start_position)
    }
}

impl<T: Located + ?Sized> Located for Box<T> {
    fn loc(&self) -> Option<&SourceLocation> {
        (**self).loc()
    }
}

/// Implements `Located` for structs with a `loc: Option<SourceLocation>` field.
macro_rules! impl_located {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::location::Located for $ty {
                fn loc(&self) -> Option<&$crate::location::SourceLocation> {
                    self.loc.as_ref()
                }
            }
        )*
    };
}

pub(crate) use impl_located;
