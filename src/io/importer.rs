// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Expression file importer

use crate::ast::XmlNode;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Import an XML file and parse it into a tree no deeper than `max_depth`
/// below the document element
pub fn import_expression_file(path: impl AsRef<Path>, max_depth: usize) -> Result<XmlNode> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read expression file: {}", path.display()))?;

    let root = super::parse_xml_with_depth(&source, max_depth)
        .with_context(|| format!("Failed to parse expression file: {}", path.display()))?;

    debug!(path = %path.display(), nodes = root.size(), height = root.height(), "loaded expression tree");
    Ok(root)
}
