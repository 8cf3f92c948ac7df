// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::batch::{BatchResult, BatchSummary};
use colored::*;
use std::io::{self, Write};
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report one evaluated file of a batch
    pub fn report_result(result: &BatchResult) {
        let file = result.path.display().to_string();
        let time = Self::format_duration(Duration::from_micros(result.duration_us));

        match (&result.value, &result.error) {
            (Some(value), _) => println!(
                "{} {} {} {}",
                "✅".green(),
                file.cyan(),
                format!("= {}", value).bold(),
                format!("({})", time).bright_black()
            ),
            (None, Some(error)) => println!(
                "{} {} {}",
                "❌".red(),
                file.cyan(),
                error.red()
            ),
            (None, None) => {}
        }
    }

    /// Report the totals of a batch
    pub fn report_summary(summary: &BatchSummary) {
        println!("\n{}", "━".repeat(60).bright_black());
        println!("  {} {}", "Files:".bright_black(), summary.total.to_string().cyan());
        println!(
            "  {} {}",
            "Evaluated:".bright_black(),
            summary.succeeded.to_string().green()
        );
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            if summary.failed > 0 {
                summary.failed.to_string().red()
            } else {
                summary.failed.to_string().green()
            }
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(summary.elapsed).yellow()
        );
        println!("{}", "━".repeat(60).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        let _ = Self::write_error(&mut io::stderr(), message);
    }

    /// Write an error line to `out`
    pub fn write_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{} {}", "Error:".red().bold(), message)
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
