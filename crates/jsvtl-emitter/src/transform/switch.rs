//! `switch` lowering.
//!
//! VTL has no `switch`. A statement such as
//!
//! ```text
//! switch (d) {
//!     case 1: a(); break;
//!     case 2:
//!     case 3: b();
//!     default: c();
//! }
//! ```
//!
//! becomes three temporaries followed by one guarded `#if` per case:
//!
//! ```text
//! #set( $matched = false )
//! #set( $fallthrough = false )
//! #set( $discriminant = $d )
//! #if( $fallthrough || $discriminant == 1 )
//!   ...
//!   #set( $matched = true )
//!   #set( $fallthrough = false )
//! #end
//! #if( $fallthrough || $discriminant == 2 )
//!   #set( $matched = true )
//!   #set( $fallthrough = true )
//! #end
//! ...
//! #if( $fallthrough || !$matched )
//!   ...
//! #end
//! ```
//!
//! `fallthrough` carries control into the next case when the previous one
//! did not end in `break`; `matched` lets `default` run only when no case
//! did. A `default` that is not the last case is therefore only reached by
//! falling through or when no earlier case matched.

use jsvtl_estree::{BreakStatement, Statement, SwitchCase, SwitchStatement};

use super::{BreakTarget, Result, Transformer};
use crate::vtl::VtlNode;

/// References to the temporaries of one lowered `switch`.
struct SwitchTemporaries {
    matched: VtlNode,
    fallthrough: VtlNode,
    discriminant: VtlNode,
}

fn is_terminating_break(statement: &Statement) -> bool {
    matches!(statement, Statement::BreakStatement(BreakStatement { label: None, .. }))
}

impl Transformer<'_> {
    pub(super) fn lower_switch(&mut self, switch: &SwitchStatement) -> Result<VtlNode> {
        let discriminant_value = self.visit_expression(&switch.discriminant)?;
        let temps = SwitchTemporaries {
            matched: VtlNode::var(self.scopes.reserve_name("matched")),
            fallthrough: VtlNode::var(self.scopes.reserve_name("fallthrough")),
            discriminant: VtlNode::var(self.scopes.reserve_name("discriminant")),
        };
        tracing::debug!(cases = switch.cases.len(), "lowering switch");

        let mut statements = vec![
            VtlNode::set(temps.matched.clone(), VtlNode::boolean(false)),
            VtlNode::set(temps.fallthrough.clone(), VtlNode::boolean(false)),
            VtlNode::set(temps.discriminant.clone(), discriminant_value),
        ];

        // All cases share one block scope, as in JavaScript.
        let cases = self.in_scope(|this| {
            this.with_break_target(BreakTarget::Switch, |this| {
                switch
                    .cases
                    .iter()
                    .map(|case| this.lower_case(case, &temps))
                    .collect::<Result<Vec<_>>>()
            })
        })?;
        statements.extend(cases);
        Ok(VtlNode::list(statements))
    }

    fn lower_case(&mut self, case: &SwitchCase, temps: &SwitchTemporaries) -> Result<VtlNode> {
        let condition = match &case.test {
            Some(test) => VtlNode::binary(
                temps.discriminant.clone(),
                self.options.switch_equality.operator(),
                self.visit_expression(test)?,
            ),
            None => VtlNode::not(temps.matched.clone()),
        };
        let test = VtlNode::binary(temps.fallthrough.clone(), "||", condition);

        let (mut body, ends_with_break) = self.lower_case_body(&case.consequent)?;
        body.push(VtlNode::set(temps.matched.clone(), VtlNode::boolean(true)));
        body.push(VtlNode::set(
            temps.fallthrough.clone(),
            VtlNode::boolean(!ends_with_break),
        ));
        Ok(VtlNode::if_directive(test, VtlNode::list(body), None))
    }

    /// Lower a case body, consuming a terminating unlabeled `break`. The
    /// break may also close a trailing block (`case 1: { ...; break; }`).
    fn lower_case_body(&mut self, consequent: &[Statement]) -> Result<(Vec<VtlNode>, bool)> {
        match consequent.split_last() {
            Some((last, rest)) if is_terminating_break(last) => Ok((self.visit_each(rest)?, true)),
            Some((Statement::BlockStatement(block), rest))
                if block.body.last().is_some_and(is_terminating_break) =>
            {
                let mut body = self.visit_each(rest)?;
                let inner = &block.body[..block.body.len() - 1];
                body.extend(self.in_scope(|this| this.visit_each(inner))?);
                Ok((body, true))
            }
            _ => Ok((self.visit_each(consequent)?, false)),
        }
    }
}
