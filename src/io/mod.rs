// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - parsing, importing, and exporting expression trees

mod exporter;
mod importer;
mod parser;

pub use exporter::{export_xml, to_xml_string};
pub use importer::import_expression_file;
pub use parser::{parse_xml, parse_xml_with_depth};
