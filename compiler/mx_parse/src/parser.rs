//! The tree builder.
//!
//! A single forward scan with an explicit stack of open elements, so nesting
//! depth never grows the call stack. Every construct has a recovery:
//! unterminated comments run to EOF, unmatched end tags become `Stray`
//! nodes, missing end tags close implicitly at the parent's end tag or EOF.

use mx_ir::chars::{is_name_char, is_name_start, is_whitespace};
use mx_ir::{
    Attribute, Attributes, Document, Element, ElementFlags, EndTag, NodeId, NodeKind,
    ProcessingInstruction, Span,
};

use crate::cursor::Cursor;
use crate::{Problem, ProblemKind};

/// Where an attribute list stops.
#[derive(Copy, Clone, PartialEq, Eq)]
enum TagKind {
    /// `>` or `/>`.
    StartTag,
    /// `?>`.
    Declaration,
}

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    document: Document,
    problems: Vec<Problem>,
    open: Vec<NodeId>,
    text_start: Option<usize>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(text),
            document: Document::new(text),
            problems: Vec::new(),
            open: Vec::new(),
            text_start: None,
        }
    }

    pub(crate) fn run(mut self) -> (Document, Vec<Problem>) {
        while !self.cursor.is_eof() {
            if self.cursor.current() != b'<' {
                self.scan_text();
                continue;
            }
            match self.cursor.peek() {
                b'!' => self.markup_declaration(),
                b'?' => self.processing_instruction(),
                b'/' => self.end_tag(),
                b if is_name_start(b) => self.start_tag(),
                _ => {
                    // A lone `<` is kept as text.
                    self.mark_text();
                    self.cursor.advance_n(1);
                }
            }
        }
        self.flush_text();
        while let Some(id) = self.open.pop() {
            self.close_implicitly(id);
        }
        (self.document, self.problems)
    }

    // === Text ===

    fn mark_text(&mut self) {
        if self.text_start.is_none() {
            self.text_start = Some(self.cursor.pos());
        }
    }

    fn scan_text(&mut self) {
        self.mark_text();
        let next = self.cursor.find(b"<").unwrap_or(self.cursor.len());
        self.cursor.set_pos(next);
    }

    fn flush_text(&mut self) {
        if let Some(start) = self.text_start.take() {
            let span = Span::from_range(start..self.cursor.pos());
            if !span.is_empty() {
                self.document.alloc(NodeKind::Text, span, self.parent());
            }
        }
    }

    fn parent(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    fn problem(&mut self, kind: ProblemKind, start: usize, end: usize) {
        self.problems.push(Problem::new(kind, Span::from_range(start..end)));
    }

    // === Opaque constructs ===

    /// Allocate an opaque node from `start` to just past `terminator`, or to
    /// EOF with a problem when the terminator never comes.
    fn opaque(&mut self, kind: NodeKind, start: usize, terminator: &[u8], unclosed: ProblemKind) {
        let end = match self.cursor.find(terminator) {
            Some(at) => at + terminator.len(),
            None => {
                self.problem(unclosed, start, self.cursor.len());
                self.cursor.len()
            }
        };
        self.cursor.set_pos(end);
        self.document
            .alloc(kind, Span::from_range(start..end), self.parent());
    }

    fn markup_declaration(&mut self) {
        self.flush_text();
        let start = self.cursor.pos();
        if self.cursor.starts_with(b"<!--") {
            self.cursor.advance_n(4);
            self.opaque(NodeKind::Comment, start, b"-->", ProblemKind::UnclosedComment);
        } else if self.cursor.starts_with(b"<![CDATA[") {
            self.cursor.advance_n(9);
            self.opaque(NodeKind::CData, start, b"]]>", ProblemKind::UnclosedCData);
        } else {
            self.cursor.advance_n(2);
            self.declaration_body(start);
        }
    }

    /// `<!DOCTYPE ...>` and friends: ends at the first `>` outside quotes and
    /// outside an internal subset.
    fn declaration_body(&mut self, start: usize) {
        let mut depth = 0u32;
        let mut quote = None;
        let end = loop {
            if self.cursor.is_eof() {
                self.problem(ProblemKind::UnclosedDeclaration, start, self.cursor.len());
                break self.cursor.len();
            }
            let b = self.cursor.current();
            self.cursor.advance_n(1);
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => break self.cursor.pos(),
                _ => {}
            }
        };
        self.document
            .alloc(NodeKind::DocType, Span::from_range(start..end), self.parent());
    }

    fn processing_instruction(&mut self) {
        self.flush_text();
        let start = self.cursor.pos();
        self.cursor.advance_n(2);
        let target_start = self.cursor.pos();
        self.cursor.eat_while(is_name_char);
        let target = Span::from_range(target_start..self.cursor.pos());

        let attributes = if self.document.slice(target) == "xml" {
            self.scan_attributes(TagKind::Declaration)
        } else {
            Attributes::new()
        };
        let (end, closed) = match self.cursor.find(b"?>") {
            Some(at) => (at + 2, true),
            None => {
                self.problem(
                    ProblemKind::UnclosedProcessingInstruction,
                    start,
                    self.cursor.len(),
                );
                (self.cursor.len(), false)
            }
        };
        self.cursor.set_pos(end);
        let pi = ProcessingInstruction {
            target,
            attributes,
            closed,
        };
        self.document.alloc(
            NodeKind::ProcessingInstruction(pi),
            Span::from_range(start..end),
            self.parent(),
        );
    }

    // === Tags ===

    fn start_tag(&mut self) {
        self.flush_text();
        let start = self.cursor.pos();
        self.cursor.advance_n(1);
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_name_char);
        let mut element = Element::new(Span::from_range(name_start..self.cursor.pos()));
        element.attributes = self.scan_attributes(TagKind::StartTag);

        if self.cursor.starts_with(b"/>") {
            self.cursor.advance_n(2);
            element.flags |= ElementFlags::SELF_CLOSING;
            element.start_tag_end = Some(self.cursor.pos() as u32);
            let span = Span::from_range(start..self.cursor.pos());
            self.document
                .alloc(NodeKind::Element(element), span, self.parent());
        } else if self.cursor.current() == b'>' {
            self.cursor.advance_n(1);
            element.start_tag_end = Some(self.cursor.pos() as u32);
            let span = Span::from_range(start..self.cursor.pos());
            let id = self
                .document
                .alloc(NodeKind::Element(element), span, self.parent());
            self.open.push(id);
        } else {
            // The tag runs into the next `<` or EOF; it gets no content.
            let end = element.attributes_end();
            let name = self.document.element_name(&element).to_owned();
            self.problem(ProblemKind::UnclosedStartTag(name), start, end as usize);
            let span = Span::new(start as u32, end);
            self.document
                .alloc(NodeKind::Element(element), span, self.parent());
        }
    }

    fn end_tag(&mut self) {
        self.flush_text();
        let open = self.cursor.pos();
        self.cursor.advance_n(2);
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_name_char);
        let name = Span::from_range(name_start..self.cursor.pos());
        let name_text = self.document.slice(name).to_owned();

        self.cursor.eat_whitespace();
        let close = if self.cursor.current() == b'>' {
            Some(self.cursor.pos())
        } else {
            let limit = self.cursor.find(b"<").unwrap_or(self.cursor.len());
            let found = self.cursor.find_before(b'>', limit);
            if found.is_some() {
                let stray = self.cursor.current_char();
                let at = self.cursor.pos();
                self.problem(ProblemKind::StrayCharacter(stray), at, at + stray.len_utf8());
            } else {
                self.problem(
                    ProblemKind::UnclosedEndTag(name_text.clone()),
                    open,
                    self.cursor.pos(),
                );
            }
            found
        };
        let end = close.map_or(name.end as usize, |close| close + 1);
        self.cursor.set_pos(end);

        let matching = self
            .open
            .iter()
            .rposition(|&id| self.open_name(id) == Some(name_text.as_str()));
        let Some(depth) = matching.filter(|_| !name.is_empty()) else {
            self.problem(ProblemKind::OrphanEndTag(name_text), open, end);
            let span = Span::from_range(open..end);
            self.document.alloc(NodeKind::Stray, span, self.parent());
            return;
        };

        while self.open.len() > depth + 1 {
            if let Some(id) = self.open.pop() {
                self.close_implicitly(id);
            }
        }
        if let Some(id) = self.open.pop() {
            let node = self.document.node_mut(id);
            node.span.end = end as u32;
            if let Some(element) = node.as_element_mut() {
                element.end_tag = Some(EndTag {
                    open: open as u32,
                    name,
                    close: close.map(|close| close as u32),
                });
            }
        }
    }

    fn open_name(&self, id: NodeId) -> Option<&str> {
        self.document
            .node(id)
            .as_element()
            .map(|element| self.document.element_name(element))
    }

    /// An element without end tag ends with its last child.
    fn close_implicitly(&mut self, id: NodeId) {
        let last_child_end = self
            .document
            .children(id)
            .last()
            .map(|&child| self.document.node(child).span.end);
        let node = self.document.node(id);
        let end = last_child_end.unwrap_or(node.span.end);
        let start = node.span.start;
        let name = self.open_name(id).unwrap_or_default().to_owned();
        self.document.node_mut(id).span.end = end;
        self.problem(ProblemKind::UnclosedElement(name), start as usize, end as usize);
    }

    // === Attributes ===

    fn scan_attributes(&mut self, tag: TagKind) -> Attributes {
        let mut attributes = Attributes::new();
        loop {
            self.cursor.eat_whitespace();
            let b = self.cursor.current();
            let stop = self.cursor.is_eof()
                || b == b'<'
                || match tag {
                    TagKind::StartTag => b == b'>' || self.cursor.starts_with(b"/>"),
                    TagKind::Declaration => b == b'>' || self.cursor.starts_with(b"?>"),
                };
            if stop {
                return attributes;
            }
            if is_name_start(b) {
                attributes.push(self.attribute());
            } else {
                let stray = self.cursor.current_char();
                let at = self.cursor.pos();
                self.problem(ProblemKind::StrayCharacter(stray), at, at + stray.len_utf8());
                self.cursor.advance_char();
            }
        }
    }

    fn attribute(&mut self) -> Attribute {
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_name_char);
        let name = Span::from_range(name_start..self.cursor.pos());
        let after_name = self.cursor.pos();

        self.cursor.eat_whitespace();
        if self.cursor.current() != b'=' {
            self.cursor.set_pos(after_name);
            return Attribute {
                name,
                delimiter: None,
                value: None,
            };
        }
        let delimiter = Some(self.cursor.pos() as u32);
        self.cursor.advance_n(1);
        self.cursor.eat_whitespace();

        let value_start = self.cursor.pos();
        let value = match self.cursor.current() {
            quote @ (b'"' | b'\'') => {
                self.cursor.advance_n(1);
                Some(self.quoted_value(quote, value_start))
            }
            b if self.cursor.is_eof() || b == b'>' || b == b'<' || self.cursor.starts_with(b"/>") => {
                let name_text = self.document.slice(name).to_owned();
                self.problem(ProblemKind::MissingValue(name_text), name_start, value_start);
                None
            }
            _ => {
                self.cursor
                    .eat_while(|b| b != 0 && !is_whitespace(b) && b != b'>' && b != b'<');
                self.problem(ProblemKind::UnquotedValue, value_start, self.cursor.pos());
                Some(Span::from_range(value_start..self.cursor.pos()))
            }
        };
        Attribute {
            name,
            delimiter,
            value,
        }
    }

    /// The cursor sits just past the opening quote. A value ends at its
    /// closing quote unless a `<` comes first; an unterminated value stops
    /// at the next `>` or `<`.
    fn quoted_value(&mut self, quote: u8, start: usize) -> Span {
        match self.cursor.find2(quote, b'<') {
            Some(at) if self.cursor.byte_at(at) == quote => {
                self.cursor.set_pos(at + 1);
            }
            found => {
                let limit = found.unwrap_or(self.cursor.len());
                let end = self.cursor.find_before(b'>', limit).unwrap_or(limit);
                self.cursor.set_pos(end);
                self.problem(ProblemKind::UnterminatedQuote, start, end);
            }
        }
        Span::from_range(start..self.cursor.pos())
    }
}
