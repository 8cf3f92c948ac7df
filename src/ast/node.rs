// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Expression tree node definitions

use super::EvalError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Label of the element wrapping an expression document
pub const EXPRESSION_LABEL: &str = "expression";

/// Attribute holding the literal of a `number` node
pub const VALUE_ATTRIBUTE: &str = "value";

/// Read-only view of a labeled tree, as consumed by the evaluator.
///
/// Implemented by [`XmlNode`]; other trees (for instance test doubles that
/// record which nodes were visited) can be evaluated by implementing it too.
pub trait ExpressionTree {
    /// Tag name, or the text content for text nodes
    fn label(&self) -> &str;

    /// Child at `index`, if present
    fn child(&self, index: usize) -> Option<&Self>;

    fn child_count(&self) -> usize;

    /// Value of the attribute called `name`
    fn attribute_value(&self, name: &str) -> Option<&str>;

    /// Whether this node is an element rather than character data
    fn is_tag(&self) -> bool {
        true
    }
}

/// Kind of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Tag,
    Text,
}

/// Owned XML tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNode {
    pub kind: NodeType,
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn tag(label: impl Into<String>) -> Self {
        Self {
            kind: NodeType::Tag,
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeType::Text,
            label: content.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// `<number value="..."/>` leaf
    pub fn number(value: i64) -> Self {
        Self::tag(Operator::Number.as_str()).with_attribute(VALUE_ATTRIBUTE, value.to_string())
    }

    /// Binary operator node with `left` and `right` operands
    pub fn binary(op: Operator, left: XmlNode, right: XmlNode) -> Self {
        Self::tag(op.as_str()).with_child(left).with_child(right)
    }

    /// Wrap `body` in an `<expression>` document root
    pub fn expression(body: XmlNode) -> Self {
        Self::tag(EXPRESSION_LABEL).with_child(body)
    }

    /// Descend past the `<expression>` root to the node that is evaluated
    pub fn expression_body(&self) -> Result<&XmlNode, EvalError> {
        if self.kind != NodeType::Tag || self.label != EXPRESSION_LABEL {
            return Err(EvalError::NotAnExpressionDocument {
                found: self.label.clone(),
            });
        }

        if let Some(text) = self.children.iter().find(|c| c.kind == NodeType::Text) {
            return Err(EvalError::UnexpectedText(text.label.clone()));
        }

        match self.children.as_slice() {
            [body] => Ok(body),
            children => Err(EvalError::Arity {
                label: EXPRESSION_LABEL.to_string(),
                expected: 1,
                found: children.len(),
            }),
        }
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(XmlNode::size).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(XmlNode::height).max().unwrap_or(0)
    }
}

impl ExpressionTree for XmlNode {
    fn label(&self) -> &str {
        &self.label
    }

    fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn is_tag(&self) -> bool {
        self.kind == NodeType::Tag
    }
}

/// Node labels understood by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Number,
    Plus,
    Minus,
    Times,
    Divide,
}

impl Operator {
    pub const BINARY: [Operator; 4] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Times,
        Operator::Divide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Number => "number",
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Times => "times",
            Operator::Divide => "divide",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "number" => Some(Operator::Number),
            "plus" => Some(Operator::Plus),
            "minus" => Some(Operator::Minus),
            "times" => Some(Operator::Times),
            "divide" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Infix symbol, `None` for literals
    pub fn symbol(&self) -> Option<char> {
        match self {
            Operator::Number => None,
            Operator::Plus => Some('+'),
            Operator::Minus => Some('-'),
            Operator::Times => Some('*'),
            Operator::Divide => Some('/'),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
