//! Options for a single transpilation call.

use jsvtl_common::NewLineKind;
use serde::Deserialize;

/// Equality operator used when lowering `switch` case tests.
///
/// A `switch` statement carries no operator of its own, so the dialect is
/// chosen by the caller and emitted verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchEquality {
    /// `==`
    #[default]
    Loose,
    /// `===`
    Strict,
}

impl SwitchEquality {
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Loose => "==",
            Self::Strict => "===",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranspileOptions {
    /// Names injected by the host (e.g. `ctx`, `util`) that user code may
    /// reference without declaring.
    pub globals: Vec<String>,
    pub switch_equality: SwitchEquality,
    pub new_line: NewLineKind,
}

impl TranspileOptions {
    #[must_use]
    pub fn with_globals<I, S>(mut self, globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.globals.extend(globals.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_switch_equality(mut self, equality: SwitchEquality) -> Self {
        self.switch_equality = equality;
        self
    }

    #[must_use]
    pub const fn with_new_line(mut self, new_line: NewLineKind) -> Self {
        self.new_line = new_line;
        self
    }
}
