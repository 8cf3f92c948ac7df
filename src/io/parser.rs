// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XML parser using quick-xml

use crate::ast::{EvalError, NodeType, XmlNode, DEFAULT_MAX_DEPTH};
use anyhow::{anyhow, bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

/// Parse XML source into a tree rooted at the document element.
///
/// Whitespace-only text is dropped; other character data (including CDATA)
/// becomes text nodes. Declarations, comments, processing instructions and
/// DOCTYPE are ignored. Nesting is limited to [`DEFAULT_MAX_DEPTH`] below
/// the document element.
pub fn parse_xml(source: &str) -> Result<XmlNode> {
    parse_xml_with_depth(source, DEFAULT_MAX_DEPTH)
}

/// Parse XML source, rejecting elements nested more than `max_depth` levels
/// below the document element with [`EvalError::DepthExceeded`].
///
/// No tree deeper than the limit is ever built, so every recursive walk over
/// the result stays bounded.
pub fn parse_xml_with_depth(source: &str, max_depth: usize) -> Result<XmlNode> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut open: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("Malformed XML near byte {}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                check_depth(open.len(), max_depth)?;
                let node = element(&start)?;
                trace!(label = %node.label, depth = open.len(), "open element");
                open.push(node);
            }
            Event::Empty(start) => {
                check_depth(open.len(), max_depth)?;
                let node = element(&start)?;
                attach(&mut open, &mut root, node)?;
            }
            Event::End(_) => {
                let node = open
                    .pop()
                    .ok_or_else(|| anyhow!("Closing tag without a matching opening tag"))?;
                attach(&mut open, &mut root, node)?;
            }
            Event::Text(text) => {
                let content = text.unescape().context("Invalid character data")?;
                if !content.trim().is_empty() {
                    attach(&mut open, &mut root, XmlNode::text(content.into_owned()))?;
                }
            }
            Event::CData(data) => {
                let content = String::from_utf8(data.into_inner().into_owned())
                    .context("CDATA section is not valid UTF-8")?;
                attach(&mut open, &mut root, XmlNode::text(content))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        bail!("Unclosed element <{}>", unclosed.label);
    }

    root.ok_or_else(|| anyhow!("Document has no root element"))
}

/// `open` elements enclose the one being read; the document element itself
/// sits at depth 0.
fn check_depth(open: usize, max_depth: usize) -> Result<()> {
    if open > max_depth {
        return Err(EvalError::DepthExceeded { max_depth }.into());
    }
    Ok(())
}

fn element(start: &BytesStart) -> Result<XmlNode> {
    let label = std::str::from_utf8(start.name().as_ref())
        .context("Element name is not valid UTF-8")?
        .to_string();
    let mut node = XmlNode::tag(label);

    for attr in start.attributes() {
        let attr = attr.with_context(|| format!("Invalid attribute on <{}>", node.label))?;
        let name = std::str::from_utf8(attr.key.as_ref())
            .context("Attribute name is not valid UTF-8")?
            .to_string();
        let value = attr
            .unescape_value()
            .with_context(|| format!("Invalid value for attribute {:?}", name))?
            .into_owned();

        if node.attributes.insert(name.clone(), value).is_some() {
            bail!("Duplicate attribute {:?} on <{}>", name, node.label);
        }
    }

    Ok(node)
}

fn attach(open: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    if node.kind == NodeType::Text {
        bail!("Text outside the root element: {:?}", node.label);
    }
    if root.is_some() {
        bail!("Document has more than one root element (found <{}>)", node.label);
    }

    *root = Some(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExpressionTree, Operator};

    #[test]
    fn test_parse_expression_document() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
            <expression>
              <plus>
                <number value="2"/>
                <times>
                  <number value="3"/>
                  <number value="4"/>
                </times>
              </plus>
            </expression>"#;

        let root = parse_xml(source).unwrap();
        let expected = XmlNode::expression(XmlNode::binary(
            Operator::Plus,
            XmlNode::number(2),
            XmlNode::binary(Operator::Times, XmlNode::number(3), XmlNode::number(4)),
        ));
        assert_eq!(root, expected);
    }

    #[test]
    fn test_comments_and_whitespace_ignored() {
        let source = "<!-- generated -->\n<expression>\n  <!-- seven -->\n  <number value=\"7\"></number>\n</expression>\n";
        let root = parse_xml(source).unwrap();
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.child(0).unwrap().attribute_value("value"), Some("7"));
    }

    #[test]
    fn test_text_nodes_kept() {
        let root = parse_xml("<note>a &amp; b</note>").unwrap();
        let text = root.child(0).unwrap();
        assert!(!text.is_tag());
        assert_eq!(text.label(), "a & b");
    }

    #[test]
    fn test_escaped_attribute() {
        let root = parse_xml(r#"<number value="&#52;2"/>"#).unwrap();
        assert_eq!(root.attribute_value("value"), Some("42"));
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(parse_xml("").is_err());
        assert!(parse_xml("<expression>").is_err());
        assert!(parse_xml("<plus></minus>").is_err());
        assert!(parse_xml("<a/><b/>").is_err());
        assert!(parse_xml(r#"<number value="1" value="2"/>"#).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let nested = "<expression><plus><plus><number value=\"1\"/></plus></plus></expression>";
        assert!(parse_xml_with_depth(nested, 3).is_ok());

        let err = parse_xml_with_depth(nested, 2).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EvalError>(),
            Some(&EvalError::DepthExceeded { max_depth: 2 })
        );
    }

    #[test]
    fn test_hostile_nesting_rejected_without_building_tree() {
        let depth = 200_000;
        let mut source = String::with_capacity(depth * 13 + 64);
        source.push_str("<expression>");
        for _ in 0..depth {
            source.push_str("<plus>");
        }
        source.push_str("<number value=\"1\"/>");
        for _ in 0..depth {
            source.push_str("</plus>");
        }
        source.push_str("</expression>");

        let err = parse_xml(&source).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EvalError>(),
            Some(&EvalError::DepthExceeded { max_depth: DEFAULT_MAX_DEPTH })
        );
    }
}
