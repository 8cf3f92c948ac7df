// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Integration tests for the interactive session

use std::io::Cursor;
use std::path::PathBuf;
use xmlexpr::cli::Session;
use xmlexpr::config::{Config, ErrorPolicy, DEFAULT_PROMPT};
use xmlexpr::EvalError;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_session_prints_each_value() {
    let input = format!("{}\n{}\n\n", fixture("sum.xml"), fixture("quotient.xml"));
    let mut output = Vec::new();
    let mut errors = Vec::new();

    let summary = Session::new(&Config::default())
        .run(Cursor::new(input), &mut output, &mut errors)
        .unwrap();

    assert_eq!(summary.evaluated, 2);
    let expected = format!("{p}14\n{p}2\n{p}", p = DEFAULT_PROMPT);
    assert_eq!(String::from_utf8(output).unwrap(), expected);
}

#[test]
fn test_session_halts_on_first_error() {
    let input = format!(
        "{}\n{}\n{}\n",
        fixture("literal.xml"),
        fixture("negative.xml"),
        fixture("sum.xml")
    );
    let mut output = Vec::new();
    let mut errors = Vec::new();

    let err = Session::new(&Config::default())
        .run(Cursor::new(input), &mut output, &mut errors)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EvalError>(),
        Some(EvalError::NegativeResult { .. })
    ));
    let expected = format!("{p}42\n{p}", p = DEFAULT_PROMPT);
    assert_eq!(String::from_utf8(output).unwrap(), expected);
}

#[test]
fn test_session_continue_policy() {
    let config = Config {
        on_error: ErrorPolicy::Continue,
        prompt: String::new(),
        ..Config::default()
    };
    let input = format!(
        "{}\n{}\n{}\n",
        fixture("divide_by_zero.xml"),
        fixture("unknown_label.xml"),
        fixture("nested.xml")
    );
    let mut output = Vec::new();
    let mut errors = Vec::new();

    let summary = Session::new(&config)
        .run(Cursor::new(input), &mut output, &mut errors)
        .unwrap();

    assert_eq!(summary.evaluated, 1);
    assert_eq!(summary.failures.len(), 2);
    assert_eq!(String::from_utf8(output).unwrap(), "40\n");

    let errors = String::from_utf8(errors).unwrap();
    assert_eq!(errors.lines().count(), 2);
    assert_eq!(errors.matches("division by zero").count(), 1);
    assert_eq!(errors.matches("modulo").count(), 1);
}
