// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XML Expression Evaluator
//!
//! Evaluates integer arithmetic expressions stored as XML trees such as
//! `<expression><plus><number value="2"/><number value="3"/></plus></expression>`.
//! Results stay in the non-negative domain: a subtraction that would go below
//! zero, or a division by zero, anywhere in the tree is an error.

pub mod ast;
pub mod cli;
pub mod config;
pub mod generator;
pub mod io;

pub use ast::{EvalError, EvalOptions, Evaluator, ExpressionTree, Operator, XmlNode};
pub use config::Config;
pub use io::{import_expression_file, parse_xml, parse_xml_with_depth};

use anyhow::{Context, Result};
use std::path::Path;

/// Evaluate a parsed `<expression>` document
pub fn evaluate_document(root: &XmlNode, evaluator: &Evaluator) -> Result<i64, EvalError> {
    evaluator.evaluate(root.expression_body()?)
}

/// Evaluate an expression document given as XML text
pub fn evaluate_str(source: &str) -> Result<i64> {
    let root = parse_xml(source)?;
    let value = evaluate_document(&root, &Evaluator::new())?;
    Ok(value)
}

/// Load and evaluate an expression file
pub fn evaluate_file(path: impl AsRef<Path>, evaluator: &Evaluator) -> Result<i64> {
    let path = path.as_ref();
    let root = import_expression_file(path, evaluator.options().max_depth)?;
    evaluate_document(&root, evaluator)
        .with_context(|| format!("Failed to evaluate {}", path.display()))
}
