// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Expression tree module
//!
//! Defines the XML expression tree and the integer evaluator over it

mod error;
mod evaluator;
mod infix;
mod node;

pub use error::EvalError;
pub use evaluator::{EvalOptions, Evaluator, UnknownLabelPolicy, DEFAULT_MAX_DEPTH};
pub use infix::to_infix;
pub use node::{ExpressionTree, NodeType, Operator, XmlNode, EXPRESSION_LABEL, VALUE_ATTRIBUTE};
