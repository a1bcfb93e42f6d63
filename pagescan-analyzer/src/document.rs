//! Immutable document tree.
//!
//! The HTML is parsed once with `scraper` and copied into an owned arena so
//! the tree is `Send + Sync` and can be shared across extractor tasks behind
//! an `Arc` without locking.

use crate::error::{AnalyzeError, Result};
use scraper::{Html, Node as HtmlNode};
use std::collections::HashMap;
use tracing::debug;

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Other,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    children: Vec<NodeId>,
}

impl Node {
    pub fn element_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.element_name() == Some(tag)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parses a response body. The body must be valid UTF-8.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let source = std::str::from_utf8(body)
            .map_err(|e| AnalyzeError::ParseError(format!("body is not valid UTF-8: {}", e)))?;

        let html = Html::parse_document(source);
        let document = Self::from_html(&html);
        debug!("Parsed document with {} nodes", document.len());
        Ok(document)
    }

    fn from_html(html: &Html) -> Self {
        let mut nodes: Vec<Node> = Vec::new();
        let mut index: HashMap<_, usize> = HashMap::new();

        // descendants() is pre-order, so a parent is always indexed before its children
        for node in html.tree.root().descendants() {
            let kind = match node.value() {
                HtmlNode::Document | HtmlNode::Fragment => NodeKind::Document,
                HtmlNode::Element(element) => NodeKind::Element {
                    name: element.name().to_string(),
                    attrs: element
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
                HtmlNode::Text(text) => NodeKind::Text(text.to_string()),
                _ => NodeKind::Other,
            };

            let id = nodes.len();
            nodes.push(Node {
                kind,
                children: Vec::new(),
            });

            if let Some(parent) = node.parent()
                && let Some(&parent_id) = index.get(&parent.id())
            {
                nodes[parent_id].children.push(id);
            }
            index.insert(node.id(), id);
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.children.iter().map(move |&id| &self.nodes[id])
    }

    /// Depth-first, pre-order walk over every node, starting at the root.
    pub fn descendants(&self) -> Descendants<'_> {
        let stack = if self.nodes.is_empty() {
            Vec::new()
        } else {
            vec![ROOT]
        };
        Descendants {
            document: self,
            stack,
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.descendants()
            .filter(|node| matches!(node.kind, NodeKind::Element { .. }))
    }
}

pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.document.nodes[id];
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
