//! The document arena.

use crate::chars::{is_blank, is_quote};
use crate::{Attribute, Element, ElementFlags, Node, NodeId, NodeKind, Span};

/// A parsed document: the source text plus a flat arena of nodes.
///
/// The tree is built by appending nodes in document order with
/// [`Document::alloc`]; afterwards it is only read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Document {
            text: text.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a node as the last child of `parent` (or as the last root).
    ///
    /// Keeps the parent's `HAS_TEXT`/`HAS_MARKUP` flags current.
    pub fn alloc(&mut self, kind: NodeKind, span: Span, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let flag = match kind {
            NodeKind::Text if is_blank(self.slice(span)) => ElementFlags::empty(),
            NodeKind::Text => ElementFlags::HAS_TEXT,
            _ => ElementFlags::HAS_MARKUP,
        };
        self.nodes.push(Node {
            kind,
            span,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => {
                let node = &mut self.nodes[parent.index()];
                node.children.push(id);
                if let Some(element) = node.as_element_mut() {
                    element.flags |= flag;
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The text covered by `span`, or `""` when the span is not a valid
    /// slice of this document.
    #[inline]
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.to_range()).unwrap_or("")
    }

    pub fn element_name(&self, element: &Element) -> &str {
        self.slice(element.name)
    }

    pub fn attribute_name(&self, attribute: &Attribute) -> &str {
        self.slice(attribute.name)
    }

    /// The value exactly as written, quotes included.
    pub fn original_value(&self, attribute: &Attribute) -> Option<&str> {
        attribute.value.map(|value| self.slice(value))
    }

    /// The value with its surrounding quotes removed.
    pub fn attribute_value(&self, attribute: &Attribute) -> Option<&str> {
        self.original_value(attribute).map(unquote)
    }

    pub fn find_attribute<'a>(&self, element: &'a Element, name: &str) -> Option<&'a Attribute> {
        element
            .attributes
            .iter()
            .find(|attribute| self.attribute_name(attribute) == name)
    }

    /// True for text nodes made only of whitespace.
    pub fn is_blank_text(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.is_text() && is_blank(self.slice(node.span))
    }
}

/// Strip a leading quote and its matching closing quote.
fn unquote(raw: &str) -> &str {
    let Some(open) = raw.chars().next().filter(|&c| is_quote(c)) else {
        return raw;
    };
    let body = &raw[1..];
    body.strip_suffix(open).unwrap_or(body)
}

#[cfg(test)]
mod tests;
