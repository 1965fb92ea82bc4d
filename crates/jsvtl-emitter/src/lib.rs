//! ESTree to Velocity Template Language (VTL) transform and printer.
//!
//! # Architecture
//!
//! The pipeline runs in two phases over a single source `Program`:
//!
//! 1. The [`Transformer`] walks the ESTree depth-first, resolving every
//!    identifier through a [`ScopeTable`] that flattens JavaScript's block
//!    scoping into VTL's single variable namespace, and produces a tree of
//!    [`VtlNode`]s.
//! 2. The printer renders that tree with a [`RenderContext`] that owns the
//!    indentation and line-ending policy.
//!
//! Any construct without a VTL equivalent aborts the whole call with a
//! [`TranspileError`]; there is no partial output.

pub mod error;
pub use error::{TranspileError, TranspileErrorKind};

pub mod options;
pub use options::{SwitchEquality, TranspileOptions};

// Scope flattening (source names -> unique template names)
pub mod scope;
pub use scope::{DISCARD_NAME, ScopeTable};

// ESTree -> VTL node lowering
pub mod transform;
pub use transform::{Transformer, transform_program};

// Target AST and printer
pub mod vtl;
pub use vtl::{Alternate, Identifier, IfDirective, Literal, RenderContext, VtlNode, print};

use jsvtl_estree::Program;

/// Transform `program` and render it to template text.
pub fn transpile(program: &Program, options: &TranspileOptions) -> Result<String, TranspileError> {
    let root = transform_program(program, options)?;
    Ok(print(&root, options.new_line))
}
