//! Compile-time constant detection for field initializers.
//!
//! A field holds a constant value when its type is primitive or `String`,
//! it is `final`, and its initializer is a constant expression built from
//! literals, constant names and operators.
//!
//! Constants of other classes cannot be resolved from one file, so a
//! qualified name such as `Limits.MAX_SIZE` counts as constant when its last
//! segment is a known constant or is spelled like one.

use crate::java::text;
use name_lint_core::classifier::check_all_caps;
use std::collections::HashSet;
use tree_sitter::Node;

const LITERAL_KINDS: &[&str] = &[
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
    "character_literal",
    "string_literal",
    "true",
    "false",
];

/// Returns true if `ty` is a type a constant variable can have.
pub(crate) fn is_constant_type(ty: Node<'_>, src: &[u8]) -> bool {
    match ty.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" => true,
        "type_identifier" => text(ty, src) == "String",
        "scoped_type_identifier" => text(ty, src) == "java.lang.String",
        _ => false,
    }
}

/// Returns true if `expr` is a constant expression.
///
/// `known` holds the names of the constant fields in scope.
pub(crate) fn is_constant_expression(expr: Node<'_>, src: &[u8], known: &HashSet<String>) -> bool {
    let kind = expr.kind();
    if LITERAL_KINDS.contains(&kind) {
        return true;
    }

    let constant = |field: &str| {
        expr.child_by_field_name(field)
            .is_some_and(|n| is_constant_expression(n, src, known))
    };

    match kind {
        "identifier" => known.contains(text(expr, src)),
        "field_access" => is_qualified_constant(expr, src, known),
        "parenthesized_expression" => expr
            .named_child(0)
            .is_some_and(|inner| is_constant_expression(inner, src, known)),
        "unary_expression" => constant("operand"),
        "binary_expression" => constant("left") && constant("right"),
        "ternary_expression" => {
            constant("condition") && constant("consequence") && constant("alternative")
        }
        "cast_expression" => {
            expr.child_by_field_name("type")
                .is_some_and(|t| is_constant_type(t, src))
                && constant("value")
        }
        _ => false,
    }
}

/// `Type.NAME` or `pkg.Type.NAME`. Accesses through `this`, `super` or a
/// call are never constant.
fn is_qualified_constant(expr: Node<'_>, src: &[u8], known: &HashSet<String>) -> bool {
    let (Some(object), Some(field)) = (
        expr.child_by_field_name("object"),
        expr.child_by_field_name("field"),
    ) else {
        return false;
    };
    if !is_qualified_name(object) || field.kind() != "identifier" {
        return false;
    }
    let name = text(field, src);
    known.contains(name) || check_all_caps(name).is_none()
}

/// A plain dotted name such as `Outer` or `java.lang.Long`.
fn is_qualified_name(node: Node<'_>) -> bool {
    match node.kind() {
        "identifier" => true,
        "field_access" => {
            node.child_by_field_name("object").is_some_and(is_qualified_name)
                && node
                    .child_by_field_name("field")
                    .is_some_and(|f| f.kind() == "identifier")
        }
        _ => false,
    }
}
