//! Transpilation errors.
//!
//! Every error is fatal: the first rejected construct aborts the call.

use jsvtl_common::Position;
use jsvtl_estree::Located;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranspileErrorKind {
    /// A syntactically valid node kind with no VTL representation
    /// (loops other than `for...of`, functions, exceptions, ...).
    UnsupportedConstruct,
    /// A supported node kind used in an unsupported way (array holes,
    /// computed keys, bare function calls, ...).
    UnsupportedFeature,
    /// A name used without a prior declaration or global registration.
    UnresolvedIdentifier,
}

/// A fatal transpilation error.
///
/// Displays as `Line <L>, column <C>: <reason>`, or just `<reason>` when
/// the offending node carried no location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}{}", location_prefix(.location), .reason)]
pub struct TranspileError {
    pub kind: TranspileErrorKind,
    pub reason: String,
    pub location: Option<Position>,
}

fn location_prefix(location: &Option<Position>) -> String {
    location.map_or_else(String::new, |pos| format!("{pos}: "))
}

impl TranspileError {
    #[must_use]
    pub fn new(kind: TranspileErrorKind, reason: impl Into<String>, location: Option<Position>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            location,
        }
    }

    pub fn unsupported_construct(node: &impl Located, reason: impl Into<String>) -> Self {
        Self::new(TranspileErrorKind::UnsupportedConstruct, reason, node.position())
    }

    pub fn unsupported_feature(node: &impl Located, reason: impl Into<String>) -> Self {
        Self::new(TranspileErrorKind::UnsupportedFeature, reason, node.position())
    }

    pub fn unresolved(node: &impl Located, name: &str) -> Self {
        Self::new(
            TranspileErrorKind::UnresolvedIdentifier,
            format!("'{name}' is not defined"),
            node.position(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_with_location() {
        let err = TranspileError::new(
            TranspileErrorKind::UnsupportedConstruct,
            "while loops are not supported",
            Some(Position::new(2, 5)),
        );
        assert_eq!(err.to_string(), "Line 2, column 5: while loops are not supported");
    }

    #[test]
    fn message_without_location() {
        let err = TranspileError::new(TranspileErrorKind::UnresolvedIdentifier, "'x' is not defined", None);
        assert_eq!(err.to_string(), "'x' is not defined");
    }
}
