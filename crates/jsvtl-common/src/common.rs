//! Shared enums used by both the emitter and the CLI configuration layer.

use serde::{Deserialize, Serialize};

/// Line terminator used when rendering templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLineKind {
    /// `\n`
    #[serde(alias = "lineFeed")]
    Lf,
    /// `\r\n`
    #[serde(alias = "carriageReturnLineFeed")]
    Crlf,
}

impl NewLineKind {
    /// The host platform's native line ending.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) { Self::Crlf } else { Self::Lf }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

impl Default for NewLineKind {
    fn default() -> Self {
        Self::native()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_text() {
        assert_eq!(NewLineKind::Lf.as_str(), "\n");
        assert_eq!(NewLineKind::Crlf.as_str(), "\r\n");
        assert_eq!(NewLineKind::default(), NewLineKind::native());
    }

    #[test]
    fn new_line_deserializes_from_config_spelling() {
        let lf: NewLineKind = serde_json::from_str("\"lf\"").expect("lf should parse");
        let crlf: NewLineKind = serde_json::from_str("\"crlf\"").expect("crlf should parse");
        assert_eq!(lf, NewLineKind::Lf);
        assert_eq!(crlf, NewLineKind::Crlf);
    }
}
