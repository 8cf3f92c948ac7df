// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Generated expressions survive a trip through XML files

use tempfile::TempDir;
use xmlexpr::generator::{ExpressionGenerator, GeneratorConfig};
use xmlexpr::{evaluate_file, io, Evaluator};

#[test]
fn test_generated_files_evaluate_to_expected_values() {
    let dir = TempDir::new().unwrap();
    let mut generator = ExpressionGenerator::new(GeneratorConfig {
        max_depth: 5,
        max_literal: 30,
        seed: Some(99),
    });
    let evaluator = Evaluator::new();

    for i in 0..25 {
        let generated = generator.generate();
        let path = dir.path().join(format!("expr_{:03}.xml", i));
        io::export_xml(&generated.document(), &path).unwrap();

        assert_eq!(evaluate_file(&path, &evaluator).unwrap(), generated.value);
    }
}
