// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch evaluation of many expression files

use crate::ast::Evaluator;
use anyhow::{bail, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Outcome of evaluating one file
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_us: u64,
}

impl BatchResult {
    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }
}

/// Totals over a batch
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchResult], elapsed: Duration) -> Self {
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            elapsed,
        }
    }
}

/// Expand the given paths into expression files.
///
/// Files are taken as given; directories are searched recursively for
/// `.xml` files, sorted by path. Input order is otherwise preserved.
pub fn discover_expression_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|entry| entry.into_path())
                .filter(|p| p.is_file() && is_xml(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            bail!("Path not found: {}", path.display());
        }
    }

    Ok(files)
}

fn is_xml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

/// Evaluate files in parallel, returning results in input order
pub fn evaluate_batch(
    files: &[PathBuf],
    evaluator: &Evaluator,
    progress: Option<&ProgressBar>,
) -> Vec<BatchResult> {
    files
        .par_iter()
        .map(|path| {
            let start = Instant::now();
            let outcome = crate::evaluate_file(path, evaluator);
            let duration_us = start.elapsed().as_micros() as u64;

            if let Some(pb) = progress {
                pb.inc(1);
            }

            match outcome {
                Ok(value) => BatchResult {
                    path: path.clone(),
                    value: Some(value),
                    error: None,
                    duration_us,
                },
                Err(e) => BatchResult {
                    path: path.clone(),
                    value: None,
                    error: Some(format!("{:#}", e)),
                    duration_us,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SUM: &str = r#"<expression><plus><number value="1"/><number value="2"/></plus></expression>"#;
    const BAD: &str = r#"<expression><minus><number value="1"/><number value="2"/></minus></expression>"#;

    #[test]
    fn test_discover_expression_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("nested"))?;
        fs::write(temp_dir.path().join("b.xml"), SUM)?;
        fs::write(temp_dir.path().join("nested/a.xml"), SUM)?;
        fs::write(temp_dir.path().join("notes.txt"), "skip me")?;

        let files = discover_expression_files(&[temp_dir.path().to_path_buf()])?;
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "xml"));

        let missing = discover_expression_files(&[temp_dir.path().join("missing")]);
        assert!(missing.is_err());

        Ok(())
    }

    #[test]
    fn test_evaluate_batch_keeps_order() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let good = temp_dir.path().join("good.xml");
        let bad = temp_dir.path().join("bad.xml");
        fs::write(&good, SUM)?;
        fs::write(&bad, BAD)?;

        let files = vec![bad.clone(), good.clone(), bad.clone()];
        let results = evaluate_batch(&files, &Evaluator::new(), None);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].path, bad);
        assert!(results[0].error.as_deref().unwrap().contains("negative result"));
        assert_eq!(results[1].value, Some(3));
        assert!(!results[2].is_ok());

        let summary = BatchSummary::from_results(&results, Duration::ZERO);
        assert_eq!((summary.total, summary.succeeded, summary.failed), (3, 1, 2));
        Ok(())
    }
}
