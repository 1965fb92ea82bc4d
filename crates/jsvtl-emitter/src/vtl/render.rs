//! VTL printer.
//!
//! `RenderContext` carries the line-ending policy and the current indent
//! depth. Block directives take an [`IndentGuard`] for their body so the
//! depth is restored however the body's rendering ends.

use std::ops::{Deref, DerefMut};

use jsvtl_common::NewLineKind;

use super::{Alternate, IfDirective, Literal, VtlNode, binary_precedence};

pub const INDENT_UNIT: &str = "  ";

#[derive(Debug)]
pub struct RenderContext {
    new_line: NewLineKind,
    depth: usize,
}

impl RenderContext {
    #[must_use]
    pub const fn new(new_line: NewLineKind) -> Self {
        Self { new_line, depth: 0 }
    }

    #[must_use]
    pub const fn new_line(&self) -> &'static str {
        self.new_line.as_str()
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Leading whitespace for a line at the current depth.
    #[must_use]
    pub fn indentation(&self) -> String {
        INDENT_UNIT.repeat(self.depth)
    }

    pub fn indent(&mut self) {
        self.indent_by(1);
    }

    pub fn dedent(&mut self) {
        self.dedent_by(1);
    }

    pub fn indent_by(&mut self, step: usize) {
        self.depth += step;
    }

    pub fn dedent_by(&mut self, step: usize) {
        debug_assert!(self.depth >= step, "dedent below zero");
        self.depth = self.depth.saturating_sub(step);
    }

    /// Indent one level until the returned guard is dropped.
    pub fn indented(&mut self) -> IndentGuard<'_> {
        self.indent();
        IndentGuard { ctx: self, step: 1 }
    }

    /// `text` as a full line at the current depth.
    fn line(&self, text: &str) -> String {
        format!("{}{}{}", self.indentation(), text, self.new_line())
    }
}

/// Restores the indent depth on drop.
pub struct IndentGuard<'a> {
    ctx: &'a mut RenderContext,
    step: usize,
}

impl Deref for IndentGuard<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.ctx
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        self.ctx
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        self.ctx.dedent_by(self.step);
    }
}

/// Render `root` as a complete template. The final line ending is dropped
/// so the output never ends in a blank line.
#[must_use]
pub fn print(root: &VtlNode, new_line: NewLineKind) -> String {
    let mut ctx = RenderContext::new(new_line);
    let mut output = root.render(&mut ctx);
    if output.ends_with(new_line.as_str()) {
        output.truncate(output.len() - new_line.as_str().len());
    }
    tracing::trace!(bytes = output.len(), "printed template");
    output
}

/// Largest integer an `f64` holds exactly (`2^53 - 1`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Below this magnitude fractions switch to exponent form.
const MIN_PLAIN_FRACTION: f64 = 1e-6;

/// Canonical text for a number: negative zero as `0`, safe integers
/// without a fraction, and exponent form (`1e21`, `1e-7`) for magnitudes
/// outside the safe integer range or below `1e-6`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude > MAX_SAFE_INTEGER || magnitude < MIN_PLAIN_FRACTION {
        return format!("{value:e}");
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    value.to_string()
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

impl Literal {
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => quote(s),
            Self::Number(n) => format_number(*n),
            Self::Boolean(b) => b.to_string(),
            Self::Null => "$null".to_string(),
        }
    }
}

impl VtlNode {
    /// Render this node. Expressions come back inline; directives come back
    /// as complete lines at the context's current depth.
    pub fn render(&self, ctx: &mut RenderContext) -> String {
        match self {
            Self::Literal(literal) => literal.render(),
            Self::VariableReference(name) => format!("${name}"),
            Self::PropertyReference { receiver, property } => {
                format!("{}.{property}", receiver.render(ctx))
            }
            Self::MethodReference { callee, arguments } => {
                let callee = callee.render(ctx);
                format!("{callee}({})", render_comma_separated(arguments, ctx))
            }
            Self::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let precedence = binary_precedence(operator);
                let left = render_operand(left, precedence, ctx);
                let right = render_operand(right, precedence, ctx);
                format!("{left} {operator} {right}")
            }
            Self::UnaryExpression {
                operator,
                argument,
                prefix,
            } => {
                let mut arg = argument.render(ctx);
                if matches!(**argument, Self::BinaryExpression { .. }) {
                    arg = format!("({arg})");
                }
                if !prefix {
                    format!("{arg}{operator}")
                } else if operator == "!" || operator == "-" {
                    format!("{operator}{arg}")
                } else {
                    format!("{operator} {arg}")
                }
            }
            Self::ArrayList(items) => format!("[{}]", render_comma_separated(items, ctx)),
            Self::Map(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", quote(key), value.render(ctx)))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Self::SetDirective { reference, value } => {
                let reference = reference.render(ctx);
                let value = value.render(ctx);
                ctx.line(&format!("#set( {reference} = {value} )"))
            }
            Self::IfDirective(directive) => directive.render(ctx),
            Self::ForEachDirective {
                iterator,
                iterable,
                body,
            } => {
                let iterator = iterator.render(ctx);
                let iterable = iterable.render(ctx);
                let mut out = ctx.line(&format!("#foreach( {iterator} in {iterable} )"));
                out.push_str(&render_block(body, ctx));
                out.push_str(&ctx.line("#end"));
                out
            }
            Self::BreakDirective(None) => ctx.line("#break"),
            Self::BreakDirective(Some(scope)) => {
                let scope = scope.render(ctx);
                ctx.line(&format!("#break( {scope} )"))
            }
            Self::StopDirective(None) => ctx.line("#stop"),
            Self::StopDirective(Some(message)) => {
                ctx.line(&format!("#stop( {} )", quote(message)))
            }
            Self::IncludeDirective(files) => {
                let files: Vec<String> = files.iter().map(|f| quote(f)).collect();
                ctx.line(&format!("#include( {} )", files.join(", ")))
            }
            Self::ParseDirective(file) => ctx.line(&format!("#parse( {} )", quote(file))),
            Self::StatementList(statements) => {
                statements.iter().map(|stmt| stmt.render(ctx)).collect()
            }
        }
    }
}

impl IfDirective {
    fn render(&self, ctx: &mut RenderContext) -> String {
        let mut out = String::new();
        self.render_branch("#if", ctx, &mut out);
        out.push_str(&ctx.line("#end"));
        out
    }

    fn render_branch(&self, keyword: &str, ctx: &mut RenderContext, out: &mut String) {
        let test = self.test.render(ctx);
        out.push_str(&ctx.line(&format!("{keyword}( {test} )")));
        out.push_str(&render_block(&self.consequent, ctx));
        match &self.alternate {
            Some(Alternate::ElseIf(next)) => next.render_branch("#elseif", ctx, out),
            Some(Alternate::Else(body)) => {
                out.push_str(&ctx.line("#else"));
                out.push_str(&render_block(body, ctx));
            }
            None => {}
        }
    }
}

fn render_block(body: &VtlNode, ctx: &mut RenderContext) -> String {
    let mut inner = ctx.indented();
    body.render(&mut inner)
}

/// Parenthesize `operand` only when it binds strictly looser than its parent.
fn render_operand(operand: &VtlNode, parent: Option<u8>, ctx: &mut RenderContext) -> String {
    let text = operand.render(ctx);
    match (parent, operand.precedence()) {
        (Some(parent), Some(own)) if own < parent => format!("({text})"),
        _ => text,
    }
}

fn render_comma_separated(nodes: &[VtlNode], ctx: &mut RenderContext) -> String {
    let parts: Vec<String> = nodes.iter().map(|node| node.render(ctx)).collect();
    parts.join(", ")
}
