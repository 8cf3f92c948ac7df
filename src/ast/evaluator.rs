// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Expression evaluator - reduces an expression tree to an integer

use super::{EvalError, ExpressionTree, Operator, EXPRESSION_LABEL, VALUE_ATTRIBUTE};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

/// Default bound on expression nesting
pub const DEFAULT_MAX_DEPTH: usize = 1_000;

/// What to do with a node whose label is not a known operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLabelPolicy {
    /// Fail with [`EvalError::UnknownLabel`]
    #[default]
    Reject,
    /// Evaluate the node to 0, as legacy expression tools did
    Zero,
}

/// Evaluator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOptions {
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
    pub unknown_labels: UnknownLabelPolicy,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_labels: UnknownLabelPolicy::Reject,
        }
    }
}

/// Recursive evaluator for integer expression trees.
///
/// Operands are evaluated left to right, except for `divide`, which evaluates
/// its denominator first and fails before touching the numerator when the
/// denominator is zero. Subtraction must never go below zero at any node.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Evaluate an expression node (not the `<expression>` document root)
    #[instrument(level = "debug", skip_all, fields(label = node.label()))]
    pub fn evaluate<T: ExpressionTree>(&self, node: &T) -> Result<i64, EvalError> {
        let result = self.evaluate_node(node, 1);

        match &result {
            Ok(value) => debug!(value, "expression evaluated"),
            Err(e) => debug!(error = %e, "expression rejected"),
        }

        result
    }

    fn evaluate_node<T: ExpressionTree>(&self, node: &T, depth: usize) -> Result<i64, EvalError> {
        if depth > self.options.max_depth {
            return Err(EvalError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        if !node.is_tag() {
            return Err(EvalError::UnexpectedText(node.label().to_string()));
        }

        let Some(op) = Operator::from_label(node.label()) else {
            return self.unrecognized(node.label());
        };
        trace!(depth, operator = %op, "visiting node");

        match op {
            Operator::Number => parse_literal(node),

            Operator::Plus => {
                let (left, right) = self.evaluate_operands(node, op, depth)?;
                left.checked_add(right)
                    .ok_or(EvalError::Overflow { operator: op, left, right })
            }

            Operator::Minus => {
                let (left, right) = self.evaluate_operands(node, op, depth)?;
                let difference = left
                    .checked_sub(right)
                    .ok_or(EvalError::Overflow { operator: op, left, right })?;

                if difference < 0 {
                    return Err(EvalError::NegativeResult { left, right });
                }
                Ok(difference)
            }

            Operator::Times => {
                let (left, right) = self.evaluate_operands(node, op, depth)?;
                left.checked_mul(right)
                    .ok_or(EvalError::Overflow { operator: op, left, right })
            }

            Operator::Divide => {
                let (numerator, denominator) = operand_nodes(node, op)?;

                let denominator = self.evaluate_node(denominator, depth + 1)?;
                if denominator == 0 {
                    return Err(EvalError::DivisionByZero);
                }

                let numerator = self.evaluate_node(numerator, depth + 1)?;
                numerator.checked_div(denominator).ok_or(EvalError::Overflow {
                    operator: op,
                    left: numerator,
                    right: denominator,
                })
            }
        }
    }

    fn evaluate_operands<T: ExpressionTree>(
        &self,
        node: &T,
        op: Operator,
        depth: usize,
    ) -> Result<(i64, i64), EvalError> {
        let (left, right) = operand_nodes(node, op)?;
        let left = self.evaluate_node(left, depth + 1)?;
        let right = self.evaluate_node(right, depth + 1)?;
        Ok((left, right))
    }

    fn unrecognized(&self, label: &str) -> Result<i64, EvalError> {
        if label == EXPRESSION_LABEL {
            return Err(EvalError::ExpressionRoot);
        }

        match self.options.unknown_labels {
            UnknownLabelPolicy::Reject => Err(EvalError::UnknownLabel(label.to_string())),
            UnknownLabelPolicy::Zero => {
                warn!(label, "unrecognized node label evaluated as 0");
                Ok(0)
            }
        }
    }
}

fn operand_nodes<T: ExpressionTree>(node: &T, op: Operator) -> Result<(&T, &T), EvalError> {
    let arity = || EvalError::Arity {
        label: op.as_str().to_string(),
        expected: 2,
        found: node.child_count(),
    };

    if node.child_count() != 2 {
        return Err(arity());
    }

    match (node.child(0), node.child(1)) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(arity()),
    }
}

fn parse_literal<T: ExpressionTree>(node: &T) -> Result<i64, EvalError> {
    let value = node
        .attribute_value(VALUE_ATTRIBUTE)
        .ok_or_else(|| EvalError::MissingAttribute(VALUE_ATTRIBUTE.to_string()))?;

    value
        .parse::<i64>()
        .map_err(|_| EvalError::InvalidNumber(value.to_string()))
}
