//! Element recursion driver.
//!
//! Places every child relative to its previous sibling, formats start tags,
//! recurses into content and places end tags. The whitespace between two
//! siblings belongs to the later one: a node never edits the whitespace
//! after its own last word.

use mx_ir::chars::{contains_line_break, is_blank, width};
use mx_ir::{Element, EndTag, NodeId, NodeKind, ProcessingInstruction, Span};

use super::category::{self, Category};
use super::FormatContext;
use crate::constraints::Constraints;
use crate::stack::ensure_sufficient_stack;

/// What the last non-whitespace content of a child list was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Last {
    Nothing,
    Markup,
    /// Text that was formatted.
    Text,
    /// Content left where it was written (text in block content, and the
    /// markup around it).
    UntouchedText,
}

/// End of the content formatted so far, and what it was.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Trailing {
    pub(crate) end: u32,
    pub(crate) last: Last,
}

impl Trailing {
    pub(crate) fn is_empty(&self) -> bool {
        self.last == Last::Nothing
    }
}

impl FormatContext<'_> {
    /// Format `children`, starting right after `start`.
    ///
    /// Block children of an element that also holds text keep the layout
    /// they were written with: none of them moves, only their insides are
    /// formatted.
    pub(super) fn format_children(
        &mut self,
        children: &[NodeId],
        category: Category,
        c: &mut Constraints,
        start: u32,
        at_document: bool,
    ) -> Trailing {
        let doc = self.doc;
        let keeps_layout = category == Category::IgnoreSpace
            && !at_document
            && children
                .iter()
                .any(|&id| doc.node(id).is_text() && !doc.is_blank_text(id));
        let markup = if keeps_layout {
            Last::UntouchedText
        } else {
            Last::Markup
        };
        let mut trailing = Trailing {
            end: start,
            last: Last::Nothing,
        };
        for &id in children {
            let node = doc.node(id);
            if node.is_text() {
                if !doc.is_blank_text(id) {
                    trailing = self.format_text_child(node.span, category, c, trailing);
                }
                continue;
            }
            let end = self.content_end(id);
            if category == Category::IgnoreSpace && self.outside_range(Span::new(trailing.end, end))
            {
                self.account(c, trailing.end, end);
            } else {
                if keeps_layout {
                    self.account(c, trailing.end, node.span.start);
                } else {
                    self.place(trailing, node.span.start, category, c, at_document);
                }
                self.format_node(id, category, c);
            }
            trailing = Trailing { end, last: markup };
        }
        trailing
    }

    fn format_text_child(
        &mut self,
        span: Span,
        category: Category,
        c: &mut Constraints,
        trailing: Trailing,
    ) -> Trailing {
        let end = self.whitespace_run_start(span.start, span.end);
        let last = if category == Category::IgnoreSpace {
            self.account(c, trailing.end, end);
            Last::UntouchedText
        } else {
            let join = category.joins(self.config);
            self.format_text(trailing.end, end, join, c);
            Last::Text
        };
        Trailing { end, last }
    }

    /// Offset just past the last non-whitespace byte of a node. Differs from
    /// the span end only for elements closed implicitly.
    fn content_end(&self, id: NodeId) -> u32 {
        let node = self.doc.node(id);
        match node.as_element() {
            Some(element) if element.end_tag.is_none() && !element.is_self_closing() => {
                let floor = element.start_tag_end.unwrap_or(node.span.start);
                self.whitespace_run_start(floor, node.span.end)
            }
            _ => node.span.end,
        }
    }

    // === Placement ===

    /// Place a markup child starting at `to` after `trailing`.
    fn place(
        &mut self,
        trailing: Trailing,
        to: u32,
        category: Category,
        c: &mut Constraints,
        at_document: bool,
    ) {
        let from = trailing.end;
        match category {
            Category::IgnoreSpace if trailing.last == Last::UntouchedText => {
                self.account(c, from, to);
            }
            Category::IgnoreSpace if at_document && trailing.is_empty() => {
                if is_blank(self.slice(from, to)) {
                    self.replace(from, to, "");
                }
            }
            Category::IgnoreSpace => self.place_block(from, to, c),
            Category::NormalizeSpace | Category::MixedContent => {
                self.place_inline(from, to, c.indent_level(), c);
            }
            Category::PreserveSpace => {}
        }
    }

    /// Own line at the current level, keeping up to `preserved_newlines`
    /// blank lines.
    fn place_block(&mut self, from: u32, to: u32, c: &mut Constraints) {
        let gap = self.slice(from, to);
        if !is_blank(gap) {
            self.account(c, from, to);
            return;
        }
        let newlines = self.kept_line_breaks(gap);
        let level = c.indent_level();
        let new_text = self.line_break(level, newlines);
        self.replace(from, to, &new_text);
        c.start_line(level);
    }

    /// Same line after one space, or a new line at `level` when the current
    /// line is already full. An empty gap stays empty.
    fn place_inline(&mut self, from: u32, to: u32, level: usize, c: &mut Constraints) {
        if from == to {
            return;
        }
        if !is_blank(self.slice(from, to)) {
            self.account(c, from, to);
            return;
        }
        if c.overflows() {
            tracing::trace!(offset = to, level, "breaking before inline markup");
            let new_text = self.line_break(level, 1);
            self.replace(from, to, &new_text);
            c.start_line(level);
        } else {
            self.replace(from, to, " ");
            c.consume(1);
        }
    }

    // === Nodes ===

    fn format_node(&mut self, id: NodeId, parent: Category, c: &mut Constraints) {
        let doc = self.doc;
        let node = doc.node(id);
        match &node.kind {
            NodeKind::Element(element) => {
                ensure_sufficient_stack(|| self.format_element(id, element, parent, c));
            }
            NodeKind::ProcessingInstruction(pi) if !pi.attributes.is_empty() => {
                self.format_declaration(node.span, pi, c);
            }
            _ => self.account(c, node.span.start, node.span.end),
        }
    }

    fn format_element(
        &mut self,
        id: NodeId,
        element: &Element,
        parent: Category,
        c: &mut Constraints,
    ) {
        let doc = self.doc;
        c.consume(1 + width(doc.element_name(element)));
        self.format_attributes(&element.attributes, element.name.end, c, true);
        let Some(tag_end) = element.start_tag_end else {
            return;
        };
        self.format_start_tag_close(element, tag_end, c);
        if element.is_self_closing() {
            return;
        }

        let node = doc.node(id);
        let category = category::resolve(doc, element, parent, self.config, self.model);
        let mut child = c.derive_for_child();
        child.set_available_line_width(c.available_line_width());
        let trailing = if category == Category::PreserveSpace {
            let content_end = element.end_tag.as_ref().map_or(node.span.end, |tag| tag.open);
            self.account(&mut child, tag_end, content_end);
            None
        } else {
            Some(self.format_children(&node.children, category, &mut child, tag_end, false))
        };
        c.set_available_line_width(child.available_line_width());

        let Some(end_tag) = &element.end_tag else {
            return;
        };
        if let Some(trailing) = trailing {
            self.place_end_tag(trailing, end_tag.open, category, c);
        }
        self.format_end_tag(end_tag, c);
    }

    /// `>` loses the whitespace before it; `/>` gets exactly one space or
    /// none depending on `space_before_empty_close_tag`.
    fn format_start_tag_close(&mut self, element: &Element, tag_end: u32, c: &mut Constraints) {
        let attributes_end = element.attributes_end();
        let level = c.indent_level();
        let own_line = self.config.closing_bracket_new_line
            && self.config.split_attributes
            && element.attributes.len() > 1;
        let (close, close_width) = if element.is_self_closing() {
            (tag_end - 2, 2)
        } else {
            (tag_end - 1, 1)
        };
        if own_line {
            self.replace_with_indentation(attributes_end, close, level);
            c.start_line(level);
            c.consume(close_width);
        } else if element.is_self_closing() && self.config.space_before_empty_close_tag {
            self.collapse_to_space(attributes_end, close);
            c.consume(close_width + 1);
        } else {
            self.remove_whitespace(attributes_end, close);
            c.consume(close_width);
        }
    }

    /// Place `</name>` after the content described by `trailing`. End tags
    /// never move for width alone once text precedes them.
    fn place_end_tag(
        &mut self,
        trailing: Trailing,
        to: u32,
        category: Category,
        c: &mut Constraints,
    ) {
        let from = trailing.end;
        let gap = self.slice(from, to);
        if !is_blank(gap) {
            self.account(c, from, to);
            return;
        }
        let level = c.indent_level();
        match trailing.last {
            Last::Nothing => {
                if gap.is_empty() {
                    return;
                }
                if contains_line_break(gap) || c.overflows() {
                    self.replace_gap_with_line_break(from, to, level, c);
                } else {
                    c.consume(width(gap));
                }
            }
            Last::UntouchedText => self.account(c, from, to),
            Last::Markup if category == Category::IgnoreSpace => {
                self.replace_gap_with_line_break(from, to, level, c);
            }
            Last::Markup => self.place_inline(from, to, level, c),
            Last::Text => {
                if gap.is_empty() {
                    return;
                }
                if category.joins(self.config) {
                    self.replace(from, to, " ");
                    c.consume(1);
                } else if contains_line_break(gap) {
                    self.replace_gap_with_line_break(from, to, level, c);
                } else {
                    c.consume(width(gap));
                }
            }
        }
    }

    fn replace_gap_with_line_break(&mut self, from: u32, to: u32, level: usize, c: &mut Constraints) {
        let new_text = self.line_break(level, 1);
        self.replace(from, to, &new_text);
        c.start_line(level);
    }

    /// `</name  >` becomes `</name>`.
    fn format_end_tag(&mut self, end_tag: &EndTag, c: &mut Constraints) {
        if let Some(close) = end_tag.close {
            self.remove_whitespace(end_tag.name.end, close);
        }
        let name_width = width(self.doc.slice(end_tag.name));
        c.consume(2 + name_width + usize::from(end_tag.close.is_some()));
    }

    /// `<?xml ...?>`: pseudo-attributes are spaced like attributes but never
    /// wrapped.
    fn format_declaration(&mut self, span: Span, pi: &ProcessingInstruction, c: &mut Constraints) {
        c.consume(2 + width(self.doc.slice(pi.target)));
        self.format_attributes(&pi.attributes, pi.target.end, c, false);
        if pi.closed {
            let attributes_end = pi
                .attributes
                .last()
                .map_or(pi.target.end, mx_ir::Attribute::end);
            self.remove_whitespace(attributes_end, span.end - 2);
            c.consume(2);
        }
    }
}
