// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluation errors
//!
//! `NegativeResult` and `DivisionByZero` are the domain errors of the
//! non-negative integer arithmetic. Every other variant reports a tree that
//! does not have the expected shape.

use super::Operator;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("negative result not permitted: {left} - {right}")]
    NegativeResult { left: i64, right: i64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operator}: {left} and {right}")]
    Overflow {
        operator: Operator,
        left: i64,
        right: i64,
    },

    #[error("unrecognized node label: <{0}>")]
    UnknownLabel(String),

    #[error("unexpected text content: {0:?}")]
    UnexpectedText(String),

    #[error("<expression> is a document root and cannot be evaluated directly")]
    ExpressionRoot,

    #[error("expected an <expression> document root, found <{found}>")]
    NotAnExpressionDocument { found: String },

    #[error("<{label}> needs exactly {expected} children, found {found}")]
    Arity {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("<number> is missing its \"{0}\" attribute")]
    MissingAttribute(String),

    #[error("invalid number literal: {0:?}")]
    InvalidNumber(String),

    #[error("expression nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}
