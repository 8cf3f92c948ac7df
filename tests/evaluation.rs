// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Integration tests for evaluating expression files

use std::path::PathBuf;
use xmlexpr::ast::{to_infix, EvalOptions, UnknownLabelPolicy, DEFAULT_MAX_DEPTH};
use xmlexpr::cli::{discover_expression_files, evaluate_batch};
use xmlexpr::{evaluate_file, import_expression_file, EvalError, Evaluator};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn eval_fixture(name: &str) -> anyhow::Result<i64> {
    evaluate_file(fixture(name), &Evaluator::new())
}

#[test]
fn test_fixture_values() {
    assert_eq!(eval_fixture("literal.xml").unwrap(), 42);
    assert_eq!(eval_fixture("sum.xml").unwrap(), 14);
    assert_eq!(eval_fixture("quotient.xml").unwrap(), 2);
    assert_eq!(eval_fixture("nested.xml").unwrap(), 40);
}

#[test]
fn test_fixture_domain_errors() {
    let err = eval_fixture("divide_by_zero.xml").unwrap_err();
    assert_eq!(err.downcast_ref::<EvalError>(), Some(&EvalError::DivisionByZero));
    assert!(format!("{:#}", err).contains("divide_by_zero.xml"));

    let err = eval_fixture("negative.xml").unwrap_err();
    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::NegativeResult { left: 3, right: 5 })
    );
}

#[test]
fn test_unknown_label_policy() {
    let err = eval_fixture("unknown_label.xml").unwrap_err();
    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::UnknownLabel("modulo".into()))
    );

    let lenient = Evaluator::with_options(EvalOptions {
        unknown_labels: UnknownLabelPolicy::Zero,
        ..EvalOptions::default()
    });
    assert_eq!(evaluate_file(fixture("unknown_label.xml"), &lenient).unwrap(), 1);
}

#[test]
fn test_depth_limit_on_files() {
    let shallow = Evaluator::with_options(EvalOptions {
        max_depth: 4,
        ..EvalOptions::default()
    });
    assert_eq!(evaluate_file(fixture("nested.xml"), &shallow).unwrap(), 40);

    let too_shallow = Evaluator::with_options(EvalOptions {
        max_depth: 3,
        ..EvalOptions::default()
    });
    let err = evaluate_file(fixture("nested.xml"), &too_shallow).unwrap_err();
    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::DepthExceeded { max_depth: 3 })
    );
}

#[test]
fn test_infix_of_fixture() {
    let root = import_expression_file(fixture("nested.xml"), DEFAULT_MAX_DEPTH).unwrap();
    let body = root.expression_body().unwrap();
    assert_eq!(to_infix(body), "((8 * 5) - (12 / 4)) + (7 / 2)");
}

#[test]
fn test_batch_over_fixture_directory() {
    let files = discover_expression_files(&[fixture("")]).unwrap();
    assert_eq!(files.len(), 7);

    let results = evaluate_batch(&files, &Evaluator::new(), None);
    let ok: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
    assert_eq!(ok.len(), 4);

    let zero = results
        .iter()
        .find(|r| r.path.ends_with("divide_by_zero.xml"))
        .unwrap();
    assert!(zero.error.as_deref().unwrap().contains("division by zero"));
}
