//! Text reflow.
//!
//! A text run is a sequence of words separated by whitespace gaps. Words are
//! never edited; each gap is kept, joined to one space, or replaced with a
//! line break depending on the content category and the remaining width.

use mx_ir::chars::{contains_line_break, is_whitespace, skip_whitespace, width};
use mx_ir::Attribute;

use super::FormatContext;
use crate::constraints::Constraints;

impl FormatContext<'_> {
    /// Reflow the words of `from..to`. The run may start with whitespace,
    /// which is placed like any other gap; it must end at a word.
    pub(super) fn format_text(&mut self, from: u32, to: u32, join: bool, c: &mut Constraints) {
        let text = self.doc.text();
        let bytes = text.as_bytes();
        let to = to as usize;
        let mut pos = from as usize;
        while pos < to {
            let word_start = skip_whitespace(text, pos, to);
            if word_start >= to {
                break;
            }
            let mut word_end = word_start;
            while word_end < to && !is_whitespace(bytes[word_end]) {
                word_end += 1;
            }
            let word_width = width(&text[word_start..word_end]);
            self.format_gap(pos as u32, word_start as u32, word_width, join, c);
            pos = word_end;
        }
    }

    /// Place the gap `from..to` before a word of `word_width` columns.
    fn format_gap(&mut self, from: u32, to: u32, word_width: usize, join: bool, c: &mut Constraints) {
        let level = c.indent_level();
        if from == to {
            c.consume(word_width);
            return;
        }
        let gap = self.slice(from, to);
        if !join && contains_line_break(gap) {
            let newlines = self.kept_line_breaks(gap);
            let new_text = self.line_break(level, newlines);
            self.replace(from, to, &new_text);
            c.start_line(level);
        } else if c.would_overflow(1 + word_width) {
            tracing::trace!(offset = to, word_width, "wrapping text");
            if join {
                self.replace(from, to, self.line_separator);
                c.continue_after_break(0);
            } else {
                let new_text = self.line_break(level, 1);
                self.replace(from, to, &new_text);
                c.start_line(level);
            }
        } else if join {
            self.replace(from, to, " ");
            c.consume(1);
        } else {
            c.consume(width(gap));
        }
        c.consume(word_width);
    }

    /// Account for an attribute value. A value spanning lines continues the
    /// budget from its last line.
    pub(super) fn format_attribute_value(&mut self, attribute: &Attribute, c: &mut Constraints) {
        let Some(value) = attribute.value else {
            return;
        };
        let raw = self.doc.slice(value);
        match mx_ir::chars::last_line_width(raw) {
            Some(last) => c.continue_after_break(last),
            None => c.consume(self.doc.attribute_value(attribute).map_or(0, width)),
        }
    }
}
