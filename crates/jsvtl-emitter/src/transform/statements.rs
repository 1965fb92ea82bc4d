use jsvtl_estree::{
    AssignmentExpression, AssignmentOperator, BlockStatement, BreakStatement, Expression,
    ExpressionStatement, ForOfStatement, ForOfTarget, IfStatement, OpaqueNode, Pattern, Statement,
    UpdateExpression, UpdateOperator, VariableDeclaration,
};

use super::expressions::is_supported_binary;
use super::{BreakTarget, Result, Transformer};
use crate::error::{TranspileError, TranspileErrorKind};
use crate::vtl::VtlNode;

/// Velocity's implicit loop variable; `#break( $foreach )` leaves the
/// innermost `#foreach`.
const FOREACH_SCOPE: &str = "foreach";

fn unsupported(node: &OpaqueNode, reason: &str) -> Result<VtlNode> {
    Err(TranspileError::unsupported_construct(node, reason))
}

impl Transformer<'_> {
    pub(super) fn visit_statement(&mut self, statement: &Statement) -> Result<VtlNode> {
        match statement {
            Statement::ExpressionStatement(stmt) => self.visit_expression_statement(stmt),
            Statement::BlockStatement(block) => self.visit_block(block),
            Statement::EmptyStatement(_) => Ok(VtlNode::list(Vec::new())),
            Statement::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            Statement::IfStatement(stmt) => self.visit_if(stmt),
            Statement::SwitchStatement(stmt) => self.lower_switch(stmt),
            Statement::ForOfStatement(stmt) => self.visit_for_of(stmt),
            Statement::BreakStatement(stmt) => self.visit_break(stmt),

            Statement::WhileStatement(n) => unsupported(n, "while loops are not supported"),
            Statement::DoWhileStatement(n) => unsupported(n, "do...while loops are not supported"),
            Statement::ForStatement(n) => unsupported(n, "for loops are not supported"),
            Statement::ForInStatement(n) => unsupported(n, "for...in loops are not supported"),
            Statement::ContinueStatement(n) => unsupported(n, "continue statements are not supported"),
            Statement::ReturnStatement(n) => unsupported(n, "return statements are not supported"),
            Statement::FunctionDeclaration(n) => {
                unsupported(n, "function declarations are not supported")
            }
            Statement::ClassDeclaration(n) => unsupported(n, "class declarations are not supported"),
            Statement::ThrowStatement(n) => unsupported(n, "throw statements are not supported"),
            Statement::TryStatement(n) => unsupported(n, "try statements are not supported"),
            Statement::LabeledStatement(n) => unsupported(n, "labeled statements are not supported"),
            Statement::WithStatement(n) => unsupported(n, "with statements are not supported"),
            Statement::DebuggerStatement(n) => unsupported(n, "debugger statements are not supported"),
            Statement::ImportDeclaration(n)
            | Statement::ExportNamedDeclaration(n)
            | Statement::ExportDefaultDeclaration(n)
            | Statement::ExportAllDeclaration(n) => {
                unsupported(n, "module declarations are not supported")
            }
            Statement::Unknown => Err(TranspileError::new(
                TranspileErrorKind::UnsupportedConstruct,
                "unsupported statement",
                None,
            )),
        }
    }

    pub(super) fn visit_block(&mut self, block: &BlockStatement) -> Result<VtlNode> {
        self.in_scope(|this| this.visit_statements(&block.body))
    }

    fn visit_expression_statement(&mut self, stmt: &ExpressionStatement) -> Result<VtlNode> {
        // Directive prologue entries such as "use strict".
        if stmt.directive.is_some() {
            return Ok(VtlNode::list(Vec::new()));
        }
        match &stmt.expression {
            Expression::AssignmentExpression(assign) => self.visit_assignment(assign),
            Expression::UpdateExpression(update) => self.visit_update(update),
            expression => {
                let value = self.visit_expression(expression)?;
                Ok(VtlNode::set(self.discard_reference(), value))
            }
        }
    }

    /// Each declarator is bound before its initializer is lowered, so
    /// `const a = a` resolves the initializer to the new binding.
    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration) -> Result<VtlNode> {
        let mut statements = Vec::with_capacity(decl.declarations.len());
        for declarator in &decl.declarations {
            let Pattern::Identifier(id) = &declarator.id else {
                return Err(TranspileError::unsupported_feature(
                    &declarator.id,
                    "destructuring declarations are not supported",
                ));
            };
            let target = self.scopes.declare(&id.name);
            if let Some(init) = &declarator.init {
                let value = self.visit_expression(init)?;
                statements.push(VtlNode::set(VtlNode::var(target), value));
            }
        }
        Ok(VtlNode::list(statements))
    }

    fn visit_assignment(&mut self, assign: &AssignmentExpression) -> Result<VtlNode> {
        let target = self.visit_assignment_target(&assign.left)?;
        let operator = match assign.operator {
            AssignmentOperator::Assign => None,
            compound => match compound.binary_operator() {
                Some(binary) if is_supported_binary(binary) => Some(binary),
                _ => {
                    return Err(TranspileError::unsupported_feature(
                        assign,
                        format!("the '{}' operator is not supported", compound.as_str()),
                    ));
                }
            },
        };
        let value = self.visit_expression(&assign.right)?;
        let value = match operator {
            Some(binary) => VtlNode::binary(target.clone(), binary.as_str(), value),
            None => value,
        };
        Ok(VtlNode::set(target, value))
    }

    fn visit_assignment_target(&self, pattern: &Pattern) -> Result<VtlNode> {
        match pattern {
            Pattern::Identifier(id) => self.resolve(id),
            Pattern::MemberExpression(member) if !member.computed => self.visit_member(member),
            Pattern::MemberExpression(member) => Err(TranspileError::unsupported_feature(
                member,
                "assignment to a computed member is not supported",
            )),
            Pattern::ObjectPattern(n)
            | Pattern::ArrayPattern(n)
            | Pattern::AssignmentPattern(n)
            | Pattern::RestElement(n) => Err(TranspileError::unsupported_feature(
                n,
                "destructuring assignment is not supported",
            )),
            Pattern::Unknown => Err(TranspileError::new(
                TranspileErrorKind::UnsupportedFeature,
                "unsupported assignment target",
                None,
            )),
        }
    }

    /// `x++` and `--x` as statements become `#set( $x = $x + 1 )`.
    fn visit_update(&self, update: &UpdateExpression) -> Result<VtlNode> {
        let target = match &*update.argument {
            Expression::Identifier(id) => self.resolve(id)?,
            Expression::MemberExpression(member) if !member.computed => self.visit_member(member)?,
            other => {
                return Err(TranspileError::unsupported_feature(
                    other,
                    "increment and decrement require a variable or property operand",
                ));
            }
        };
        let operator = match update.operator {
            UpdateOperator::Increment => "+",
            UpdateOperator::Decrement => "-",
        };
        let value = VtlNode::binary(target.clone(), operator, VtlNode::number(1.0));
        Ok(VtlNode::set(target, value))
    }

    fn visit_if(&mut self, stmt: &IfStatement) -> Result<VtlNode> {
        let test = self.visit_expression(&stmt.test)?;
        let consequent = self.visit_statement(&stmt.consequent)?;
        let alternate = stmt
            .alternate
            .as_deref()
            .map(|alternate| self.visit_statement(alternate))
            .transpose()?;
        Ok(VtlNode::if_directive(test, consequent, alternate))
    }

    /// The iterable is lowered in the enclosing scope; the loop binding
    /// lives in a frame of its own around the body.
    fn visit_for_of(&mut self, stmt: &ForOfStatement) -> Result<VtlNode> {
        if stmt.is_await {
            return Err(TranspileError::unsupported_construct(
                stmt,
                "for await...of loops are not supported",
            ));
        }
        let iterable = self.visit_expression(&stmt.right)?;

        self.in_scope(|this| {
            let iterator = this.visit_for_of_binding(&stmt.left)?;
            let body = this.with_break_target(BreakTarget::Loop, |this| {
                this.visit_statement(&stmt.body)
            })?;
            Ok(VtlNode::foreach(iterator, iterable, body))
        })
    }

    fn visit_for_of_binding(&mut self, left: &ForOfTarget) -> Result<VtlNode> {
        match left {
            ForOfTarget::VariableDeclaration(decl) => {
                let [declarator] = decl.declarations.as_slice() else {
                    return Err(TranspileError::unsupported_feature(
                        decl,
                        "for...of loops must declare exactly one binding",
                    ));
                };
                let Pattern::Identifier(id) = &declarator.id else {
                    return Err(TranspileError::unsupported_feature(
                        &declarator.id,
                        "destructuring declarations are not supported",
                    ));
                };
                Ok(VtlNode::var(self.scopes.declare(&id.name)))
            }
            ForOfTarget::Identifier(id) => self.resolve(id),
            ForOfTarget::MemberExpression(member) => Err(TranspileError::unsupported_feature(
                member,
                "for...of loops cannot bind to a member expression",
            )),
            ForOfTarget::ObjectPattern(n) | ForOfTarget::ArrayPattern(n) => Err(
                TranspileError::unsupported_feature(n, "destructuring declarations are not supported"),
            ),
            ForOfTarget::Unknown => Err(TranspileError::new(
                TranspileErrorKind::UnsupportedFeature,
                "unsupported for...of binding",
                None,
            )),
        }
    }

    /// Only unlabeled breaks out of a `for...of` reach this point. The break
    /// that ends a switch case is consumed by the switch lowering.
    fn visit_break(&self, stmt: &BreakStatement) -> Result<VtlNode> {
        if stmt.label.is_some() {
            return Err(TranspileError::unsupported_feature(
                stmt,
                "labeled break statements are not supported",
            ));
        }
        match self.break_targets.last() {
            Some(BreakTarget::Loop) => Ok(VtlNode::BreakDirective(Some(Box::new(
                VtlNode::var(FOREACH_SCOPE),
            )))),
            Some(BreakTarget::Switch) => Err(TranspileError::unsupported_feature(
                stmt,
                "break is only supported as the last statement of a switch case",
            )),
            None => Err(TranspileError::unsupported_feature(
                stmt,
                "break outside of a loop or switch is not supported",
            )),
        }
    }
}
