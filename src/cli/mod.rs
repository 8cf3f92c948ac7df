// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem: interactive session, batch evaluation and reporting

pub mod batch;
pub mod repl;
pub mod reporter;

pub use batch::{discover_expression_files, evaluate_batch, BatchResult, BatchSummary};
pub use repl::{Session, SessionSummary};
pub use reporter::Reporter;
