//! MX IR - document tree types for the mx markup formatter.
//!
//! This crate contains the data structures shared by the parser and the
//! formatting engine:
//! - [`Span`] byte ranges into the document text
//! - [`Document`], an arena of [`Node`]s addressed by [`NodeId`]
//! - [`Element`], [`Attribute`] and [`ElementFlags`]
//! - [`LineIndex`] for offset ↔ line/character conversion
//! - [`chars`], the whitespace, name and quote classes
//!
//! # Design
//!
//! - **Offsets, not strings**: nodes store spans; names and values are
//!   sliced out of the document text on demand.
//! - **Flat tree**: children are `NodeId` lists, so walking the tree never
//!   chases boxes and the document can be cloned cheaply.

pub mod chars;
mod document;
mod line_index;
mod node;
mod span;

pub use document::Document;
pub use line_index::{LineIndex, Position};
pub use node::{
    Attribute, Attributes, Element, ElementFlags, EndTag, Node, NodeId, NodeKind,
    ProcessingInstruction,
};
pub use span::Span;
