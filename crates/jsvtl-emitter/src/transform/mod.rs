//! ESTree to VTL lowering.
//!
//! The [`Transformer`] is a single depth-first pass. Statements may declare
//! names and therefore take `&mut self`; expressions only resolve names and
//! take `&self`. Visitors return the node they produce, so there is no
//! shared "current node" state between a parent and its children.
//!
//! The pass is split by concern:
//! - `statements`: declarations, assignments, `if`, `for...of`, `break`
//! - `expressions`: references, literals, collections, operators
//! - `switch`: `switch`/`case` lowering to guarded `#if` blocks

use jsvtl_estree::{Identifier, Program, Statement};

use crate::error::TranspileError;
use crate::options::TranspileOptions;
use crate::scope::{DISCARD_NAME, ScopeTable};
use crate::vtl::VtlNode;

mod expressions;
mod statements;
mod switch;

type Result<T> = std::result::Result<T, TranspileError>;

/// What an unlabeled `break` would leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BreakTarget {
    Loop,
    Switch,
}

/// Lowers one `Program` to a VTL node tree.
pub struct Transformer<'o> {
    scopes: ScopeTable,
    options: &'o TranspileOptions,
    break_targets: Vec<BreakTarget>,
}

/// Transform `program` into a VTL `StatementList`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(statements = program.body.len(), globals = options.globals.len())
)]
pub fn transform_program(program: &Program, options: &TranspileOptions) -> Result<VtlNode> {
    Transformer::new(options).transform(program)
}

impl<'o> Transformer<'o> {
    #[must_use]
    pub fn new(options: &'o TranspileOptions) -> Self {
        Self {
            scopes: ScopeTable::with_globals(&options.globals),
            options,
            break_targets: Vec::new(),
        }
    }

    /// Consume the transformer and lower `program`. The program body gets
    /// its own frame above the global one.
    pub fn transform(mut self, program: &Program) -> Result<VtlNode> {
        let result = self.in_scope(|this| this.visit_statements(&program.body));
        if let Err(err) = &result {
            tracing::debug!(%err, "transpilation rejected");
        }
        result
    }

    #[must_use]
    pub const fn scopes(&self) -> &ScopeTable {
        &self.scopes
    }

    /// Run `f` inside a fresh frame. The frame is popped on both the success
    /// and the error path.
    fn in_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.scopes.push_scope();
        let result = f(self);
        self.scopes.pop_scope();
        result
    }

    fn with_break_target<T>(
        &mut self,
        target: BreakTarget,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.break_targets.push(target);
        let result = f(self);
        self.break_targets.pop();
        result
    }

    /// Lower `statements` in order. A statement that lowers to several
    /// (declarations, `switch`) or to none (directives, `;`) is spliced into
    /// the enclosing sequence, so lists never nest.
    fn visit_each(&mut self, statements: &[Statement]) -> Result<Vec<VtlNode>> {
        let mut nodes = Vec::with_capacity(statements.len());
        for statement in statements {
            match self.visit_statement(statement)? {
                VtlNode::StatementList(inner) => nodes.extend(inner),
                node => nodes.push(node),
            }
        }
        Ok(nodes)
    }

    fn visit_statements(&mut self, statements: &[Statement]) -> Result<VtlNode> {
        self.visit_each(statements).map(VtlNode::list)
    }

    /// `$discard`, resolved in the global frame so a user binding named
    /// `discard` can never receive expression-statement results.
    fn discard_reference(&self) -> VtlNode {
        VtlNode::var(self.scopes.global(DISCARD_NAME).unwrap_or(DISCARD_NAME))
    }

    fn resolve(&self, id: &Identifier) -> Result<VtlNode> {
        self.scopes
            .lookup(&id.name)
            .map(VtlNode::var)
            .ok_or_else(|| TranspileError::unresolved(id, &id.name))
    }
}
