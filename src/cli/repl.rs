// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interactive session: prompt for a file, evaluate it, print the result

use super::Reporter;
use crate::ast::Evaluator;
use crate::config::{Config, ErrorPolicy};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// An input that could not be evaluated
#[derive(Debug, Clone)]
pub struct Failure {
    pub input: String,
    pub message: String,
}

/// What happened during a session that ran to completion
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub evaluated: usize,
    pub failures: Vec<Failure>,
}

/// Prompt/evaluate/print loop over expression file names.
///
/// The session ends on an empty line or end of input. Under
/// [`ErrorPolicy::Halt`] the first failure ends the session with that error
/// and nothing more is written. Under [`ErrorPolicy::Continue`] each failure
/// is written once to `errors` and the session prompts again.
pub struct Session {
    evaluator: Evaluator,
    prompt: String,
    on_error: ErrorPolicy,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            evaluator: Evaluator::with_options(config.eval_options()),
            prompt: config.prompt.clone(),
            on_error: config.on_error,
        }
    }

    pub fn run<R: BufRead, W: Write, E: Write>(
        &self,
        mut input: R,
        output: &mut W,
        errors: &mut E,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let name = line.trim_end_matches(&['\n', '\r'][..]);
            if name.is_empty() {
                break;
            }

            match crate::evaluate_file(name, &self.evaluator) {
                Ok(value) => {
                    info!(file = name, value, "evaluated");
                    writeln!(output, "{}", value)?;
                    summary.evaluated += 1;
                }
                Err(e) if self.on_error == ErrorPolicy::Continue => {
                    let message = format!("{:#}", e);
                    debug!(file = name, error = %message, "skipping input");
                    Reporter::write_error(errors, &message)?;
                    summary.failures.push(Failure {
                        input: name.to_string(),
                        message,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }
}
