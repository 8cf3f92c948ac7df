// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Infix rendering of expression trees

use super::{ExpressionTree, Operator, VALUE_ATTRIBUTE};

/// Render an expression node as infix text, e.g. `2 + (3 * 4)`.
///
/// Every nested operation is parenthesized so the text shows the grouping of
/// the tree exactly. Nodes the evaluator would reject are rendered as `?`.
pub fn to_infix<T: ExpressionTree>(node: &T) -> String {
    let mut out = String::new();
    write_node(node, &mut out, true);
    out
}

fn write_node<T: ExpressionTree>(node: &T, out: &mut String, top: bool) {
    let op = if node.is_tag() {
        Operator::from_label(node.label())
    } else {
        None
    };

    match op {
        Some(Operator::Number) => match node.attribute_value(VALUE_ATTRIBUTE) {
            Some(value) => out.push_str(value),
            None => out.push('?'),
        },
        Some(op) => {
            let (Some(left), Some(right)) = (node.child(0), node.child(1)) else {
                out.push('?');
                return;
            };

            if !top {
                out.push('(');
            }
            write_node(left, out, false);
            out.push(' ');
            out.extend(op.symbol());
            out.push(' ');
            write_node(right, out, false);
            if !top {
                out.push(')');
            }
        }
        None => out.push('?'),
    }
}
