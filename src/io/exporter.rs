// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XML exporter

use crate::ast::{NodeType, XmlNode};
use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Serialize a tree as an indented XML document
pub fn to_xml_string(root: &XmlNode) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_node(&mut writer, root)?;

    let bytes = writer.into_inner().into_inner();
    let mut xml = String::from_utf8(bytes).context("Serialized XML is not valid UTF-8")?;
    xml.push('\n');
    Ok(xml)
}

/// Write a tree to an XML file
pub fn export_xml(root: &XmlNode, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let xml = to_xml_string(root)?;
    std::fs::write(path, xml)
        .with_context(|| format!("Failed to write XML file: {}", path.display()))
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &XmlNode) -> Result<()> {
    if node.kind == NodeType::Text {
        writer.write_event(Event::Text(BytesText::new(&node.label)))?;
        return Ok(());
    }

    let mut start = BytesStart::new(node.label.as_str());
    for (name, value) in &node.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if node.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.label.as_str())))?;

    Ok(())
}
