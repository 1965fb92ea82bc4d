//! ESTree source AST for the jsvtl transpiler.
//!
//! The transpiler does not tokenize or parse JavaScript itself. It consumes
//! the ESTree JSON produced by an external parser (acorn, espree, esprima,
//! ...) with location tracking enabled.
//!
//! Each ESTree `type` tag maps onto a variant of a closed enum
//! (`Statement`, `Expression`, `Pattern`, `ForOfTarget`, `ObjectMember`) so
//! consumers can match exhaustively. Kinds the transpiler never lowers are
//! still modelled as `OpaqueNode` so that rejections can point at a source
//! location; anything unknown falls back to an `Unknown` variant.

pub mod ast;
pub use ast::*;

pub mod builders;

// Location handling (`loc` spans and the `Located` trait)
pub mod location;
pub use location::{Located, SourceLocation, SourcePosition};
