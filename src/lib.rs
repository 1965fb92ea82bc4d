//! jsvtl: transpile a JavaScript subset into Velocity Template Language.
//!
//! The input is an ESTree document (the JSON produced by acorn, espree,
//! esprima and friends with `locations: true`). The output is template text.
//!
//! ```text
//! ESTree JSON --serde--> jsvtl_estree::Program
//!             --transform_program--> VtlNode tree
//!             --print--> template text
//! ```
//!
//! Most callers only need [`transpile_json`]. The member crates are
//! re-exported for callers that already hold a parsed `Program` or want the
//! node tree instead of text.

use thiserror::Error;

pub use jsvtl_common as common;
pub use jsvtl_common::{NewLineKind, Position};

pub use jsvtl_estree as estree;
pub use jsvtl_estree::Program;

pub use jsvtl_emitter as emitter;
pub use jsvtl_emitter::{
    SwitchEquality, TranspileError, TranspileErrorKind, TranspileOptions, transpile,
};

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;

// Native CLI
#[cfg(feature = "cli")]
pub mod cli;

/// Failure of a whole-document transpilation.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not JSON, or its root is not an ESTree `Program`.
    #[error("invalid ESTree input: {0}")]
    Parse(serde_json::Error),
    #[error(transparent)]
    Transpile(#[from] TranspileError),
}

// The JSON error is already in the message, so it must not also be `source()`.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

/// Parse an ESTree JSON document and transpile it.
pub fn transpile_json(source: &str, options: &TranspileOptions) -> Result<String, Error> {
    let program = Program::from_json(source)?;
    Ok(transpile(&program, options)?)
}
