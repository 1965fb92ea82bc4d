//! Constructors for location-free ESTree nodes.
//!
//! Used by tests and benchmarks to build source trees without going through
//! JSON. Every node built here has `loc: None`.

use crate::ast::*;

pub fn program(body: Vec<Statement>) -> Program {
    Program {
        body,
        source_type: None,
        loc: None,
    }
}

// =========================================================================
// Expressions
// =========================================================================

pub fn ident(name: impl Into<String>) -> Expression {
    Expression::Identifier(identifier(name))
}

pub fn identifier(name: impl Into<String>) -> Identifier {
    Identifier {
        name: name.into(),
        loc: None,
    }
}

fn literal(value: LiteralValue) -> Expression {
    Expression::Literal(Literal {
        value,
        raw: None,
        regex: None,
        bigint: None,
        loc: None,
    })
}

pub fn string(value: impl Into<String>) -> Expression {
    literal(LiteralValue::String(value.into()))
}

pub fn number(value: f64) -> Expression {
    literal(LiteralValue::Number(value))
}

pub fn boolean(value: bool) -> Expression {
    literal(LiteralValue::Boolean(value))
}

pub fn null() -> Expression {
    literal(LiteralValue::Null)
}

pub fn array(elements: Vec<Expression>) -> Expression {
    Expression::ArrayExpression(ArrayExpression {
        elements: elements.into_iter().map(Some).collect(),
        loc: None,
    })
}

/// Object literal with identifier keys.
pub fn object(properties: Vec<(&str, Expression)>) -> Expression {
    Expression::ObjectExpression(ObjectExpression {
        properties: properties
            .into_iter()
            .map(|(key, value)| {
                ObjectMember::Property(Property {
                    key: ident(key),
                    value,
                    kind: PropertyKind::Init,
                    computed: false,
                    method: false,
                    shorthand: false,
                    loc: None,
                })
            })
            .collect(),
        loc: None,
    })
}

fn member_expression(object: Expression, property: Expression, computed: bool) -> MemberExpression {
    MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed,
        optional: false,
        loc: None,
    }
}

/// `object.property`
pub fn member(object: Expression, property: &str) -> Expression {
    Expression::MemberExpression(member_expression(object, ident(property), false))
}

/// `object[index]`
pub fn index(object: Expression, index: Expression) -> Expression {
    Expression::MemberExpression(member_expression(object, index, true))
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::CallExpression(CallExpression {
        callee: Box::new(callee),
        arguments,
        optional: false,
        loc: None,
    })
}

/// `object.method(arguments)`
pub fn method_call(object: Expression, method: &str, arguments: Vec<Expression>) -> Expression {
    call(member(object, method), arguments)
}

pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryExpression(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        loc: None,
    })
}

pub fn logical(left: Expression, operator: LogicalOperator, right: Expression) -> Expression {
    Expression::LogicalExpression(LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        loc: None,
    })
}

pub fn unary(operator: UnaryOperator, argument: Expression) -> Expression {
    Expression::UnaryExpression(UnaryExpression {
        operator,
        argument: Box::new(argument),
        prefix: true,
        loc: None,
    })
}

pub fn update(operator: UpdateOperator, argument: Expression, prefix: bool) -> Expression {
    Expression::UpdateExpression(UpdateExpression {
        operator,
        argument: Box::new(argument),
        prefix,
        loc: None,
    })
}

pub fn assign_with(target: Pattern, operator: AssignmentOperator, value: Expression) -> Expression {
    Expression::AssignmentExpression(AssignmentExpression {
        operator,
        left: Box::new(target),
        right: Box::new(value),
        loc: None,
    })
}

/// `name = value`
pub fn assign(name: &str, value: Expression) -> Expression {
    assign_with(
        Pattern::Identifier(identifier(name)),
        AssignmentOperator::Assign,
        value,
    )
}

/// `object.property = value`
pub fn assign_member(object: Expression, property: &str, value: Expression) -> Expression {
    assign_with(
        Pattern::MemberExpression(member_expression(object, ident(property), false)),
        AssignmentOperator::Assign,
        value,
    )
}

// =========================================================================
// Statements
// =========================================================================

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::ExpressionStatement(ExpressionStatement {
        expression,
        directive: None,
        loc: None,
    })
}

pub fn declaration(kind: VariableKind, declarators: Vec<(&str, Option<Expression>)>) -> Statement {
    Statement::VariableDeclaration(variable_declaration(kind, declarators))
}

fn variable_declaration(
    kind: VariableKind,
    declarators: Vec<(&str, Option<Expression>)>,
) -> VariableDeclaration {
    VariableDeclaration {
        declarations: declarators
            .into_iter()
            .map(|(name, init)| VariableDeclarator {
                id: Pattern::Identifier(identifier(name)),
                init,
                loc: None,
            })
            .collect(),
        kind,
        loc: None,
    }
}

/// `const name = init;`
pub fn const_decl(name: &str, init: Expression) -> Statement {
    declaration(VariableKind::Const, vec![(name, Some(init))])
}

/// `let name = init;` or `let name;`
pub fn let_decl(name: &str, init: Option<Expression>) -> Statement {
    declaration(VariableKind::Let, vec![(name, init)])
}

pub fn block(body: Vec<Statement>) -> Statement {
    Statement::BlockStatement(BlockStatement { body, loc: None })
}

pub fn if_stmt(test: Expression, consequent: Statement, alternate: Option<Statement>) -> Statement {
    Statement::IfStatement(IfStatement {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
        loc: None,
    })
}

/// `for (const binding of iterable) body`
pub fn for_of(binding: &str, iterable: Expression, body: Statement) -> Statement {
    Statement::ForOfStatement(ForOfStatement {
        left: ForOfTarget::VariableDeclaration(variable_declaration(
            VariableKind::Const,
            vec![(binding, None)],
        )),
        right: iterable,
        body: Box::new(body),
        is_await: false,
        loc: None,
    })
}

pub fn switch(discriminant: Expression, cases: Vec<SwitchCase>) -> Statement {
    Statement::SwitchStatement(SwitchStatement {
        discriminant,
        cases,
        loc: None,
    })
}

/// `case test: consequent` (`default:` when `test` is `None`).
pub fn case(test: Option<Expression>, consequent: Vec<Statement>) -> SwitchCase {
    SwitchCase {
        test,
        consequent,
        loc: None,
    }
}

pub fn break_stmt() -> Statement {
    Statement::BreakStatement(BreakStatement {
        label: None,
        loc: None,
    })
}

/// A statement kind the transpiler never lowers, e.g. `Statement::WhileStatement`.
pub fn opaque(kind: fn(OpaqueNode) -> Statement) -> Statement {
    kind(OpaqueNode::default())
}
