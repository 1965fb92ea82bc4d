//! ESTree node definitions.
//!
//! Only the fields the transpiler reads are modelled; everything else in
//! the JSON (ranges, `start`/`end` offsets, comments, ...) is ignored.

use serde::Deserialize;

use crate::location::{Located, SourceLocation, impl_located};

// =============================================================================
// Program
// =============================================================================

/// Root of an ESTree document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Program {
    pub body: Vec<Statement>,
    #[serde(default, rename = "sourceType")]
    pub source_type: Option<String>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Document {
    Program(Program),
}

impl Program {
    /// Parse an ESTree JSON document whose root node is a `Program`.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        let Document::Program(program) = serde_json::from_str(source)?;
        Ok(program)
    }

    /// Convert an already-parsed JSON value whose root node is a `Program`.
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        let Document::Program(program) = serde_json::from_value(value)?;
        Ok(program)
    }
}

/// A node kind the transpiler never lowers. Only its location is kept.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OpaqueNode {
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    ExpressionStatement(ExpressionStatement),
    BlockStatement(BlockStatement),
    EmptyStatement(OpaqueNode),
    VariableDeclaration(VariableDeclaration),
    IfStatement(IfStatement),
    SwitchStatement(SwitchStatement),
    ForOfStatement(ForOfStatement),
    BreakStatement(BreakStatement),
    ContinueStatement(OpaqueNode),
    ReturnStatement(OpaqueNode),
    WhileStatement(OpaqueNode),
    DoWhileStatement(OpaqueNode),
    ForStatement(OpaqueNode),
    ForInStatement(OpaqueNode),
    FunctionDeclaration(OpaqueNode),
    ClassDeclaration(OpaqueNode),
    ThrowStatement(OpaqueNode),
    TryStatement(OpaqueNode),
    LabeledStatement(OpaqueNode),
    WithStatement(OpaqueNode),
    DebuggerStatement(OpaqueNode),
    ImportDeclaration(OpaqueNode),
    ExportNamedDeclaration(OpaqueNode),
    ExportDefaultDeclaration(OpaqueNode),
    ExportAllDeclaration(OpaqueNode),
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    /// Set for directive prologue entries such as `"use strict"`.
    #[serde(default)]
    pub directive: Option<String>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    pub declarations: Vec<VariableDeclarator>,
    pub kind: VariableKind,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    pub id: Pattern,
    #[serde(default)]
    pub init: Option<Expression>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    #[serde(default)]
    pub alternate: Option<Box<Statement>>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SwitchCase {
    /// `None` for the `default:` clause.
    #[serde(default)]
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForOfStatement {
    pub left: ForOfTarget,
    pub right: Expression,
    pub body: Box<Statement>,
    #[serde(default, rename = "await")]
    pub is_await: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// Left-hand side of a `for...of` head.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ForOfTarget {
    VariableDeclaration(VariableDeclaration),
    Identifier(Identifier),
    MemberExpression(MemberExpression),
    ObjectPattern(OpaqueNode),
    ArrayPattern(OpaqueNode),
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BreakStatement {
    #[serde(default)]
    pub label: Option<Identifier>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    MemberExpression(MemberExpression),
    CallExpression(CallExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(LogicalExpression),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    AssignmentExpression(AssignmentExpression),
    ThisExpression(OpaqueNode),
    FunctionExpression(OpaqueNode),
    ArrowFunctionExpression(OpaqueNode),
    ClassExpression(OpaqueNode),
    NewExpression(OpaqueNode),
    ConditionalExpression(OpaqueNode),
    SequenceExpression(OpaqueNode),
    TemplateLiteral(OpaqueNode),
    TaggedTemplateExpression(OpaqueNode),
    ChainExpression(OpaqueNode),
    AwaitExpression(OpaqueNode),
    YieldExpression(OpaqueNode),
    ImportExpression(OpaqueNode),
    MetaProperty(OpaqueNode),
    Super(OpaqueNode),
    /// Only valid inside array literals and call arguments.
    SpreadElement(OpaqueNode),
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// Raw literal value as found in the JSON `value` field.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Anything else, e.g. the `{}` some parsers write for a regex value.
    Other(serde_json::Value),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegExpLiteral {
    pub pattern: String,
    pub flags: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub value: LiteralValue,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub regex: Option<RegExpLiteral>,
    #[serde(default)]
    pub bigint: Option<String>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// Classified view of a `Literal`, resolving the regex/bigint extensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiteralKind<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
    Null,
    RegExp(&'a RegExpLiteral),
    BigInt(&'a str),
    Other(&'a serde_json::Value),
}

impl Literal {
    #[must_use]
    pub fn kind(&self) -> LiteralKind<'_> {
        if let Some(regex) = &self.regex {
            return LiteralKind::RegExp(regex);
        }
        if let Some(bigint) = &self.bigint {
            return LiteralKind::BigInt(bigint);
        }
        match &self.value {
            LiteralValue::Null => LiteralKind::Null,
            LiteralValue::Boolean(b) => LiteralKind::Boolean(*b),
            LiteralValue::Number(n) => LiteralKind::Number(*n),
            LiteralValue::String(s) => LiteralKind::String(s),
            LiteralValue::Other(v) => LiteralKind::Other(v),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArrayExpression {
    /// `None` entries are elisions (`[1, , 2]`).
    pub elements: Vec<Option<Expression>>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<ObjectMember>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectMember {
    Property(Property),
    SpreadElement(OpaqueNode),
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Property {
    pub key: Expression,
    pub value: Expression,
    pub kind: PropertyKind,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub shorthand: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "===")]
    StrictEqual,
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Exp,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    UnsignedShiftRight,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
}

impl BinaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::UnsignedShiftRight => ">>>",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    NullishCoalescing,
}

impl LogicalOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::NullishCoalescing => "??",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::TypeOf => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Expression>,
    #[serde(default = "default_prefix")]
    pub prefix: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

const fn default_prefix() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub argument: Box<Expression>,
    pub prefix: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    ModAssign,
    #[serde(rename = "**=")]
    ExpAssign,
    #[serde(rename = "<<=")]
    ShiftLeftAssign,
    #[serde(rename = ">>=")]
    ShiftRightAssign,
    #[serde(rename = ">>>=")]
    UnsignedShiftRightAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "||=")]
    OrAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "??=")]
    NullishAssign,
}

impl AssignmentOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::ExpAssign => "**=",
            Self::ShiftLeftAssign => "<<=",
            Self::ShiftRightAssign => ">>=",
            Self::UnsignedShiftRightAssign => ">>>=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::BitAndAssign => "&=",
            Self::OrAssign => "||=",
            Self::AndAssign => "&&=",
            Self::NullishAssign => "??=",
        }
    }

    /// The binary operator a compound assignment applies, e.g. `+` for `+=`.
    #[must_use]
    pub const fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            Self::AddAssign => Some(BinaryOperator::Add),
            Self::SubAssign => Some(BinaryOperator::Sub),
            Self::MulAssign => Some(BinaryOperator::Mul),
            Self::DivAssign => Some(BinaryOperator::Div),
            Self::ModAssign => Some(BinaryOperator::Mod),
            Self::ExpAssign => Some(BinaryOperator::Exp),
            Self::ShiftLeftAssign => Some(BinaryOperator::ShiftLeft),
            Self::ShiftRightAssign => Some(BinaryOperator::ShiftRight),
            Self::UnsignedShiftRightAssign => Some(BinaryOperator::UnsignedShiftRight),
            Self::BitOrAssign => Some(BinaryOperator::BitOr),
            Self::BitXorAssign => Some(BinaryOperator::BitXor),
            Self::BitAndAssign => Some(BinaryOperator::BitAnd),
            Self::Assign | Self::OrAssign | Self::AndAssign | Self::NullishAssign => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

// =============================================================================
// Patterns
// =============================================================================

/// Binding and assignment targets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    Identifier(Identifier),
    MemberExpression(MemberExpression),
    ObjectPattern(OpaqueNode),
    ArrayPattern(OpaqueNode),
    AssignmentPattern(OpaqueNode),
    RestElement(OpaqueNode),
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Located impls
// =============================================================================

impl_located!(
    Program,
    OpaqueNode,
    ExpressionStatement,
    BlockStatement,
    VariableDeclaration,
    VariableDeclarator,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ForOfStatement,
    BreakStatement,
    Identifier,
    Literal,
    ArrayExpression,
    ObjectExpression,
    Property,
    MemberExpression,
    CallExpression,
    BinaryExpression,
    LogicalExpression,
    UnaryExpression,
    UpdateExpression,
    AssignmentExpression,
);

impl Located for Statement {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::ExpressionStatement(n) => n.loc(),
            Self::BlockStatement(n) => n.loc(),
            Self::VariableDeclaration(n) => n.loc(),
            Self::IfStatement(n) => n.loc(),
            Self::SwitchStatement(n) => n.loc(),
            Self::ForOfStatement(n) => n.loc(),
            Self::BreakStatement(n) => n.loc(),
            Self::EmptyStatement(n)
            | Self::ContinueStatement(n)
            | Self::ReturnStatement(n)
            | Self::WhileStatement(n)
            | Self::DoWhileStatement(n)
            | Self::ForStatement(n)
            | Self::ForInStatement(n)
            | Self::FunctionDeclaration(n)
            | Self::ClassDeclaration(n)
            | Self::ThrowStatement(n)
            | Self::TryStatement(n)
            | Self::LabeledStatement(n)
            | Self::WithStatement(n)
            | Self::DebuggerStatement(n)
            | Self::ImportDeclaration(n)
            | Self::ExportNamedDeclaration(n)
            | Self::ExportDefaultDeclaration(n)
            | Self::ExportAllDeclaration(n) => n.loc(),
            Self::Unknown => None,
        }
    }
}

impl Located for Expression {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::Identifier(n) => n.loc(),
            Self::Literal(n) => n.loc(),
            Self::ArrayExpression(n) => n.loc(),
            Self::ObjectExpression(n) => n.loc(),
            Self::MemberExpression(n) => n.loc(),
            Self::CallExpression(n) => n.loc(),
            Self::BinaryExpression(n) => n.loc(),
            Self::LogicalExpression(n) => n.loc(),
            Self::UnaryExpression(n) => n.loc(),
            Self::UpdateExpression(n) => n.loc(),
            Self::AssignmentExpression(n) => n.loc(),
            Self::ThisExpression(n)
            | Self::FunctionExpression(n)
            | Self::ArrowFunctionExpression(n)
            | Self::ClassExpression(n)
            | Self::NewExpression(n)
            | Self::ConditionalExpression(n)
            | Self::SequenceExpression(n)
            | Self::TemplateLiteral(n)
            | Self::TaggedTemplateExpression(n)
            | Self::ChainExpression(n)
            | Self::AwaitExpression(n)
            | Self::YieldExpression(n)
            | Self::ImportExpression(n)
            | Self::MetaProperty(n)
            | Self::Super(n)
            | Self::SpreadElement(n) => n.loc(),
            Self::Unknown => None,
        }
    }
}

impl Located for Pattern {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::Identifier(n) => n.loc(),
            Self::MemberExpression(n) => n.loc(),
            Self::ObjectPattern(n)
            | Self::ArrayPattern(n)
            | Self::AssignmentPattern(n)
            | Self::RestElement(n) => n.loc(),
            Self::Unknown => None,
        }
    }
}

impl Located for ForOfTarget {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::VariableDeclaration(n) => n.loc(),
            Self::Identifier(n) => n.loc(),
            Self::MemberExpression(n) => n.loc(),
            Self::ObjectPattern(n) | Self::ArrayPattern(n) => n.loc(),
            Self::Unknown => None,
        }
    }
}

impl Located for ObjectMember {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::Property(n) => n.loc(),
            Self::SpreadElement(n) => n.loc(),
            Self::Unknown => None,
        }
    }
}
