use jsvtl_estree::{
    ArrayExpression, BinaryExpression, BinaryOperator, CallExpression, Expression, Literal,
    LiteralKind, LogicalExpression, LogicalOperator, MemberExpression, ObjectExpression,
    ObjectMember, OpaqueNode, Property, PropertyKind, UnaryExpression, UnaryOperator,
};

use super::{Result, Transformer};
use crate::error::{TranspileError, TranspileErrorKind};
use crate::vtl::{VtlNode, format_number};

fn unsupported(node: &OpaqueNode, reason: &str) -> Result<VtlNode> {
    Err(TranspileError::unsupported_construct(node, reason))
}

/// Comparison and arithmetic operators have a direct VTL spelling.
pub(super) const fn is_supported_binary(operator: BinaryOperator) -> bool {
    matches!(
        operator,
        BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::StrictEqual
            | BinaryOperator::StrictNotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Mod
    )
}

impl Transformer<'_> {
    pub(super) fn visit_expression(&self, expression: &Expression) -> Result<VtlNode> {
        match expression {
            Expression::Identifier(id) => self.resolve(id),
            Expression::Literal(literal) => visit_literal(literal),
            Expression::ArrayExpression(array) => self.visit_array(array),
            Expression::ObjectExpression(object) => self.visit_object(object),
            Expression::MemberExpression(member) => self.visit_member(member),
            Expression::CallExpression(call) => self.visit_call(call),
            Expression::BinaryExpression(binary) => self.visit_binary(binary),
            Expression::LogicalExpression(logical) => self.visit_logical(logical),
            Expression::UnaryExpression(unary) => self.visit_unary(unary),
            Expression::UpdateExpression(update) => Err(TranspileError::unsupported_feature(
                update,
                "increment and decrement are only supported as statements",
            )),
            Expression::AssignmentExpression(assign) => Err(TranspileError::unsupported_feature(
                assign,
                "assignments are only supported as statements",
            )),

            Expression::ThisExpression(n) => unsupported(n, "'this' is not supported"),
            Expression::FunctionExpression(n) | Expression::ArrowFunctionExpression(n) => {
                unsupported(n, "function expressions are not supported")
            }
            Expression::ClassExpression(n) => unsupported(n, "class expressions are not supported"),
            Expression::NewExpression(n) => unsupported(n, "'new' expressions are not supported"),
            Expression::ConditionalExpression(n) => {
                unsupported(n, "conditional expressions are not supported")
            }
            Expression::SequenceExpression(n) => {
                unsupported(n, "sequence expressions are not supported")
            }
            Expression::TemplateLiteral(n) | Expression::TaggedTemplateExpression(n) => {
                unsupported(n, "template literals are not supported")
            }
            Expression::ChainExpression(n) => unsupported(n, "optional chaining is not supported"),
            Expression::AwaitExpression(n) => unsupported(n, "'await' is not supported"),
            Expression::YieldExpression(n) => unsupported(n, "'yield' is not supported"),
            Expression::ImportExpression(n) => unsupported(n, "dynamic imports are not supported"),
            Expression::MetaProperty(n) => unsupported(n, "meta properties are not supported"),
            Expression::Super(n) => unsupported(n, "'super' is not supported"),
            Expression::SpreadElement(n) => Err(TranspileError::unsupported_feature(
                n,
                "spread elements are not supported",
            )),
            Expression::Unknown => Err(TranspileError::new(
                TranspileErrorKind::UnsupportedConstruct,
                "unsupported expression",
                None,
            )),
        }
    }

    fn visit_array(&self, array: &ArrayExpression) -> Result<VtlNode> {
        array
            .elements
            .iter()
            .map(|element| match element {
                Some(element) => self.visit_expression(element),
                None => Err(TranspileError::unsupported_feature(
                    array,
                    "array holes are not supported",
                )),
            })
            .collect::<Result<Vec<_>>>()
            .map(VtlNode::ArrayList)
    }

    fn visit_object(&self, object: &ObjectExpression) -> Result<VtlNode> {
        let mut entries = Vec::with_capacity(object.properties.len());
        for member in &object.properties {
            let property = match member {
                ObjectMember::Property(property) => property,
                ObjectMember::SpreadElement(n) => {
                    return Err(TranspileError::unsupported_feature(
                        n,
                        "object spread is not supported",
                    ));
                }
                ObjectMember::Unknown => {
                    return Err(TranspileError::new(
                        TranspileErrorKind::UnsupportedFeature,
                        "unsupported object member",
                        None,
                    ));
                }
            };
            let key = property_key(property)?;
            let value = self.visit_expression(&property.value)?;
            entries.push((key, value));
        }
        Ok(VtlNode::Map(entries))
    }

    /// `a.b` becomes a property link; `a[i]` becomes `.get(i)`.
    pub(super) fn visit_member(&self, member: &MemberExpression) -> Result<VtlNode> {
        if member.optional {
            return Err(TranspileError::unsupported_feature(
                member,
                "optional chaining is not supported",
            ));
        }
        let receiver = self.visit_receiver(&member.object)?;
        if member.computed {
            let index = self.visit_expression(&member.property)?;
            return Ok(VtlNode::method(receiver, "get", vec![index]));
        }
        Ok(VtlNode::prop(receiver, property_name(member)?))
    }

    fn visit_call(&self, call: &CallExpression) -> Result<VtlNode> {
        let Expression::MemberExpression(callee) = &*call.callee else {
            return Err(TranspileError::unsupported_feature(
                call,
                "function calls are only supported as method calls",
            ));
        };
        if call.optional || callee.optional {
            return Err(TranspileError::unsupported_feature(
                call,
                "optional chaining is not supported",
            ));
        }
        if callee.computed {
            return Err(TranspileError::unsupported_feature(
                callee,
                "computed method calls are not supported",
            ));
        }
        let receiver = self.visit_receiver(&callee.object)?;
        let method = property_name(callee)?;
        let arguments = call
            .arguments
            .iter()
            .map(|argument| self.visit_expression(argument))
            .collect::<Result<Vec<_>>>()?;
        Ok(VtlNode::method(receiver, method, arguments))
    }

    /// Properties and methods can only hang off a `$reference` chain.
    fn visit_receiver(&self, object: &Expression) -> Result<VtlNode> {
        let receiver = self.visit_expression(object)?;
        if !receiver.is_reference() {
            return Err(TranspileError::unsupported_feature(
                object,
                "members can only be accessed on variables and their properties",
            ));
        }
        Ok(receiver)
    }

    fn visit_binary(&self, binary: &BinaryExpression) -> Result<VtlNode> {
        if !is_supported_binary(binary.operator) {
            return Err(TranspileError::unsupported_feature(
                binary,
                format!("the '{}' operator is not supported", binary.operator.as_str()),
            ));
        }
        let left = self.visit_expression(&binary.left)?;
        let right = self.visit_expression(&binary.right)?;
        Ok(VtlNode::binary(left, binary.operator.as_str(), right))
    }

    fn visit_logical(&self, logical: &LogicalExpression) -> Result<VtlNode> {
        if logical.operator == LogicalOperator::NullishCoalescing {
            return Err(TranspileError::unsupported_feature(
                logical,
                "the '??' operator is not supported",
            ));
        }
        let left = self.visit_expression(&logical.left)?;
        let right = self.visit_expression(&logical.right)?;
        Ok(VtlNode::binary(left, logical.operator.as_str(), right))
    }

    fn visit_unary(&self, unary: &UnaryExpression) -> Result<VtlNode> {
        match unary.operator {
            UnaryOperator::Not | UnaryOperator::Minus | UnaryOperator::Plus => {
                let argument = self.visit_expression(&unary.argument)?;
                Ok(VtlNode::unary(unary.operator.as_str(), argument))
            }
            other => Err(TranspileError::unsupported_feature(
                unary,
                format!("the '{}' operator is not supported", other.as_str()),
            )),
        }
    }
}

fn visit_literal(literal: &Literal) -> Result<VtlNode> {
    match literal.kind() {
        LiteralKind::String(value) => Ok(VtlNode::string(value)),
        LiteralKind::Number(value) => Ok(VtlNode::number(value)),
        LiteralKind::Boolean(value) => Ok(VtlNode::boolean(value)),
        LiteralKind::Null => Ok(VtlNode::null()),
        LiteralKind::RegExp(_) => Err(TranspileError::unsupported_feature(
            literal,
            "regular expression literals are not supported",
        )),
        LiteralKind::BigInt(_) => Err(TranspileError::unsupported_feature(
            literal,
            "bigint literals are not supported",
        )),
        LiteralKind::Other(_) => Err(TranspileError::unsupported_feature(
            literal,
            "unsupported literal value",
        )),
    }
}

fn property_key(property: &Property) -> Result<String> {
    if property.computed {
        return Err(TranspileError::unsupported_feature(
            property,
            "computed object keys are not supported",
        ));
    }
    if property.method || property.kind != PropertyKind::Init {
        return Err(TranspileError::unsupported_feature(
            property,
            "object methods and accessors are not supported",
        ));
    }
    match &property.key {
        Expression::Identifier(id) => Ok(id.name.clone()),
        Expression::Literal(literal) => match literal.kind() {
            LiteralKind::String(value) => Ok(value.to_string()),
            LiteralKind::Number(value) => Ok(format_number(value)),
            _ => Err(TranspileError::unsupported_feature(
                literal,
                "unsupported object key",
            )),
        },
        other => Err(TranspileError::unsupported_feature(
            other,
            "unsupported object key",
        )),
    }
}

fn property_name(member: &MemberExpression) -> Result<String> {
    match &*member.property {
        Expression::Identifier(id) => Ok(id.name.clone()),
        other => Err(TranspileError::unsupported_feature(
            other,
            "unsupported property name",
        )),
    }
}
