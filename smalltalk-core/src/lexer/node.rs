use std::fmt::{Display, Write};

use crate::utils::prelude::SrcSpan;
use super::token::NodeType;

/// One entity for both tokens and syntax constructs.
///
/// Children are slots: a slot may be explicitly empty and stays so through
/// cloning, printing and evaluation. Only nodes without children may be
/// pushed back into the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_type: NodeType,
    pub text: Option<String>,
    pub children: Vec<Option<Node>>,
    pub location: SrcSpan,
}

impl Node {
    pub fn new(node_type: NodeType, location: SrcSpan) -> Self {
        Self {
            node_type,
            text: None,
            children: vec![],
            location,
        }
    }

    pub fn with_text(node_type: NodeType, text: impl Into<String>, location: SrcSpan) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(node_type, location)
        }
    }

    /// Syntax nodes start out spanning their first child, tokens widen
    /// their own span.
    pub fn append(&mut self, node: Node) {
        self.location = if self.is_leaf() && !self.node_type.is_token() {
            node.location
        } else {
            self.location.merge(node.location)
        };
        self.children.push(Some(node));
    }

    pub fn append_slot(&mut self, node: Option<Node>) {
        match node {
            Some(node) => self.append(node),
            None => self.children.push(None),
        }
    }

    /// Absent slots and out-of-range indices both read as `None`.
    pub fn child(&self, idx: usize) -> Option<&Node> {
        self.children.get(idx).and_then(Option::as_ref)
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }

    /// Short description used in error messages, e.g. ``identifier `foo` ``.
    pub fn describe(&self) -> String {
        match &self.text {
            Some(text) if self.node_type.carries_text() => {
                format!("{} `{}`", self.node_type.as_literal(), text)
            },
            _ => self.node_type.as_literal().to_string(),
        }
    }

    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = "    ".repeat(depth);
        let _ = writeln!(out, "{indent}{self}");

        for child in &self.children {
            match child {
                Some(child) => child.write_tree(out, depth + 1),
                None => {
                    let _ = writeln!(out, "{indent}    undefined");
                }
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} '{}'", self.node_type, text),
            None => write!(f, "{}", self.node_type),
        }
    }
}
