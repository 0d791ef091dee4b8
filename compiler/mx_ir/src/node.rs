//! Document tree nodes.
//!
//! Nodes live in the [`Document`](crate::Document) arena and refer to each
//! other by [`NodeId`]. Every position is a byte offset into the document
//! text; names and values are recovered by slicing, never copied.

use std::fmt;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::Span;

/// Index of a node in its document's arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

bitflags! {
    /// Facts about an element computed while the tree is built.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ElementFlags: u8 {
        /// Written as `<name/>`.
        const SELF_CLOSING = 1 << 0;
        /// Has at least one text child that is not all whitespace.
        const HAS_TEXT = 1 << 1;
        /// Has at least one element, comment, PI, CDATA or stray child.
        const HAS_MARKUP = 1 << 2;
    }
}

/// One `name="value"` pair of a start tag or XML declaration.
///
/// Invariant: `name.end <= delimiter < value.start` whenever those exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: Span,
    /// Offset of the `=`.
    pub delimiter: Option<u32>,
    /// Value including its quotes, if any.
    pub value: Option<Span>,
}

impl Attribute {
    /// Offset just past the last byte that belongs to the attribute.
    pub fn end(&self) -> u32 {
        match (self.value, self.delimiter) {
            (Some(value), _) => value.end,
            (None, Some(delimiter)) => delimiter + 1,
            (None, None) => self.name.end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.name.start, self.end())
    }
}

pub type Attributes = SmallVec<[Attribute; 4]>;

/// `</name>`; `close` is the offset of `>` when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndTag {
    pub open: u32,
    pub name: Span,
    pub close: Option<u32>,
}

impl EndTag {
    pub fn end(&self) -> u32 {
        self.close.map_or(self.name.end, |close| close + 1)
    }

    pub fn span(&self) -> Span {
        Span::new(self.open, self.end())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: Span,
    pub attributes: Attributes,
    /// Offset just past the `>` (or `/>`) of the start tag, `None` when the
    /// start tag is never closed.
    pub start_tag_end: Option<u32>,
    pub flags: ElementFlags,
    pub end_tag: Option<EndTag>,
}

impl Element {
    pub fn new(name: Span) -> Self {
        Element {
            name,
            attributes: Attributes::new(),
            start_tag_end: None,
            flags: ElementFlags::empty(),
            end_tag: None,
        }
    }

    #[inline]
    pub fn is_self_closing(&self) -> bool {
        self.flags.contains(ElementFlags::SELF_CLOSING)
    }

    #[inline]
    pub fn has_text(&self) -> bool {
        self.flags.contains(ElementFlags::HAS_TEXT)
    }

    #[inline]
    pub fn has_markup(&self) -> bool {
        self.flags.contains(ElementFlags::HAS_MARKUP)
    }

    /// Offset just past the last attribute, or past the name without
    /// attributes.
    pub fn attributes_end(&self) -> u32 {
        self.attributes
            .last()
            .map_or(self.name.end, Attribute::end)
    }
}

/// `<?target ...?>`. Only the `xml` declaration has its pseudo-attributes
/// parsed; other instructions are opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessingInstruction {
    pub target: Span,
    pub attributes: Attributes,
    pub closed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text,
    Comment,
    ProcessingInstruction(ProcessingInstruction),
    CData,
    DocType,
    /// Markup the parser could not place, kept verbatim (orphan end tags).
    Stray,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Element(_) => "Element",
            NodeKind::Text => "Text",
            NodeKind::Comment => "Comment",
            NodeKind::ProcessingInstruction(_) => "ProcessingInstruction",
            NodeKind::CData => "CData",
            NodeKind::DocType => "DocType",
            NodeKind::Stray => "Stray",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }

    /// Everything but text.
    #[inline]
    pub fn is_markup(&self) -> bool {
        !self.is_text()
    }
}
