//! Velocity Template Language (VTL) target AST.
//!
//! # Architecture
//!
//! The transformer produces a tree of `VtlNode`s; the printer in
//! [`render`] walks the tree and emits template text. Nodes are plain values
//! and are never mutated after construction.
//!
//! Expression nodes (literals, references, operators, collections) render
//! inline. Directive nodes render as full lines: current indentation, the
//! directive, then the line ending. Block directives (`#if`, `#foreach`)
//! indent their bodies one level.
//!
//! # References
//!
//! A reference chain such as `$foo.bar().baz` is built inside-out:
//!
//! ```text
//! PropertyReference {
//!     receiver: MethodReference {
//!         callee: PropertyReference { receiver: VariableReference(foo), property: bar },
//!         arguments: [],
//!     },
//!     property: baz,
//! }
//! ```
//!
//! Only the `VariableReference` at the base of a chain carries the `$`
//! sigil; the links never do. Whether a node starts a chain is therefore a
//! property of its position in the tree rather than a stored flag.

use std::fmt;

pub mod render;
pub use render::{INDENT_UNIT, IndentGuard, RenderContext, format_number, print};

/// A bare template name. Only ever rendered as part of another node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Rendered as `$null`, a reference that is never set.
    Null,
}

/// Target AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum VtlNode {
    // =========================================================================
    // Expressions
    // =========================================================================
    Literal(Literal),

    /// `$name`
    VariableReference(Identifier),

    /// `receiver.property`
    PropertyReference {
        receiver: Box<Self>,
        property: Identifier,
    },

    /// `callee(arguments)` where `callee` is a `PropertyReference`.
    MethodReference {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// `left operator right`
    BinaryExpression {
        operator: String,
        left: Box<Self>,
        right: Box<Self>,
    },

    /// `!x`, `-x`, `+ x`
    UnaryExpression {
        operator: String,
        argument: Box<Self>,
        prefix: bool,
    },

    /// `[a, b, c]`
    ArrayList(Vec<Self>),

    /// `{'key': value, ...}`
    Map(Vec<(String, Self)>),

    // =========================================================================
    // Directives
    // =========================================================================
    /// `#set( reference = value )`
    SetDirective {
        reference: Box<Self>,
        value: Box<Self>,
    },

    IfDirective(IfDirective),

    /// `#foreach( iterator in iterable ) body #end`
    ForEachDirective {
        iterator: Box<Self>,
        iterable: Box<Self>,
        body: Box<Self>,
    },

    /// `#break` or `#break( $scope )`
    BreakDirective(Option<Box<Self>>),

    /// `#stop` or `#stop( 'message' )`
    StopDirective(Option<String>),

    /// `#include( 'a', 'b' )`
    IncludeDirective(Vec<String>),

    /// `#parse( 'file' )`
    ParseDirective(String),

    /// Statements rendered back to back. Used for blocks and the program root.
    StatementList(Vec<Self>),
}

/// `#if( test ) ... #elseif( ... ) ... #else ... #end`
#[derive(Clone, Debug, PartialEq)]
pub struct IfDirective {
    pub test: Box<VtlNode>,
    pub consequent: Box<VtlNode>,
    pub alternate: Option<Alternate>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Alternate {
    /// Rendered as a chained `#elseif` sharing the outer `#end`.
    ElseIf(Box<IfDirective>),
    /// Rendered as an `#else` block.
    Else(Box<VtlNode>),
}

impl IfDirective {
    /// Build a conditional. An alternate that is itself a conditional is
    /// chained as `#elseif` instead of being nested inside `#else`.
    #[must_use]
    pub fn new(test: VtlNode, consequent: VtlNode, alternate: Option<VtlNode>) -> Self {
        let alternate = alternate.map(|alt| match alt {
            VtlNode::IfDirective(inner) => Alternate::ElseIf(Box::new(inner)),
            other => Alternate::Else(Box::new(other)),
        });
        Self {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
        }
    }
}

/// Binding strength of arithmetic operators. Other operators have none and
/// are never parenthesized.
#[must_use]
pub fn binary_precedence(operator: &str) -> Option<u8> {
    match operator {
        "+" | "-" => Some(1),
        "*" | "/" | "%" => Some(2),
        _ => None,
    }
}

// =========================================================================
// Builder helpers
// =========================================================================

impl VtlNode {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// `$name`
    pub fn var(name: impl Into<String>) -> Self {
        Self::VariableReference(Identifier::new(name))
    }

    /// `receiver.property`
    pub fn prop(receiver: Self, property: impl Into<String>) -> Self {
        Self::PropertyReference {
            receiver: Box::new(receiver),
            property: Identifier::new(property),
        }
    }

    /// `receiver.method(arguments)`
    pub fn method(receiver: Self, method: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::MethodReference {
            callee: Box::new(Self::prop(receiver, method)),
            arguments,
        }
    }

    pub fn binary(left: Self, operator: impl Into<String>, right: Self) -> Self {
        Self::BinaryExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: impl Into<String>, argument: Self) -> Self {
        Self::UnaryExpression {
            operator: operator.into(),
            argument: Box::new(argument),
            prefix: true,
        }
    }

    /// `!argument`
    pub fn not(argument: Self) -> Self {
        Self::unary("!", argument)
    }

    #[must_use]
    pub fn set(reference: Self, value: Self) -> Self {
        Self::SetDirective {
            reference: Box::new(reference),
            value: Box::new(value),
        }
    }

    #[must_use]
    pub fn if_directive(test: Self, consequent: Self, alternate: Option<Self>) -> Self {
        Self::IfDirective(IfDirective::new(test, consequent, alternate))
    }

    #[must_use]
    pub fn foreach(iterator: Self, iterable: Self, body: Self) -> Self {
        Self::ForEachDirective {
            iterator: Box::new(iterator),
            iterable: Box::new(iterable),
            body: Box::new(body),
        }
    }

    #[must_use]
    pub const fn list(statements: Vec<Self>) -> Self {
        Self::StatementList(statements)
    }

    /// Binding strength when this node is a binary operation.
    #[must_use]
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Self::BinaryExpression { operator, .. } => binary_precedence(operator),
            _ => None,
        }
    }

    /// Whether this node is a `$reference`, possibly with property or
    /// method links.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::VariableReference(_) | Self::PropertyReference { .. } | Self::MethodReference { .. }
        )
    }
}

#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod printer_tests;
