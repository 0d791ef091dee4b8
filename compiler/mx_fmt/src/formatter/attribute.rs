//! Attribute placement, delimiters and quotes.

use mx_ir::chars::{contains_line_break, is_quote, width};
use mx_ir::{Attribute, Span};

use super::FormatContext;
use crate::config::QuotePolicy;
use crate::constraints::Constraints;

impl FormatContext<'_> {
    /// Format the attributes of a tag whose name ends at `name_end`.
    ///
    /// Declaration pseudo-attributes pass `use_settings = false`: they are
    /// always separated by one space and never wrapped.
    pub(super) fn format_attributes(
        &mut self,
        attributes: &[Attribute],
        name_end: u32,
        c: &mut Constraints,
        use_settings: bool,
    ) {
        let single = attributes.len() == 1;
        let mut prev_end = name_end;
        for attribute in attributes {
            self.format_attribute(attribute, prev_end, single, use_settings, c);
            prev_end = attribute.end();
        }
    }

    fn format_attribute(
        &mut self,
        attribute: &Attribute,
        prev_end: u32,
        single: bool,
        use_settings: bool,
        c: &mut Constraints,
    ) {
        let doc = self.doc;
        let start = attribute.name.start;
        let level = c.indent_level();
        // `name="` plus the closing quote
        let name_width = width(doc.attribute_name(attribute)) + 3;

        let placed = use_settings && self.place_attribute_on_own_line(prev_end, start, single, level, c);
        if !placed {
            let value_width = doc.attribute_value(attribute).map_or(0, width);
            let wraps = use_settings
                && attribute.value.is_some()
                && c.would_overflow(1 + name_width + value_width);
            if wraps {
                tracing::trace!(offset = start, "wrapping attribute");
                self.replace_with_indentation(prev_end, start, level + 1);
                c.start_line(level + 1);
            } else {
                self.collapse_to_space(prev_end, start);
                c.consume(1);
            }
        }

        match attribute.delimiter {
            Some(delimiter) => {
                self.remove_whitespace(attribute.name.end, delimiter);
                if let Some(value) = attribute.value {
                    self.remove_whitespace(delimiter + 1, value.start);
                }
                c.consume(name_width);
                self.format_attribute_value(attribute, c);
            }
            None => c.consume(width(doc.attribute_name(attribute))),
        }

        if let (QuotePolicy::Preferred(quote), Some(value)) = (self.quotes, attribute.value) {
            self.normalize_quotes(value, quote);
        }
    }

    /// Line placement from `preserve_attribute_line_breaks` or
    /// `split_attributes`. The former wins when both apply.
    fn place_attribute_on_own_line(
        &mut self,
        prev_end: u32,
        start: u32,
        single: bool,
        level: usize,
        c: &mut Constraints,
    ) -> bool {
        let config = self.config;
        let level = if config.preserve_attribute_line_breaks
            && contains_line_break(self.slice(prev_end, start))
        {
            level + 1
        } else if config.split_attributes && !single {
            level + config.split_attributes_indent_size
        } else {
            return false;
        };
        self.replace_with_indentation(prev_end, start, level);
        c.start_line(level);
        true
    }

    /// Swap the surrounding quotes of `value` for `quote`, unless the value
    /// itself contains `quote`.
    fn normalize_quotes(&mut self, value: Span, quote: char) {
        let raw = self.doc.slice(value);
        let Some(open) = raw.chars().next() else {
            return;
        };
        let close = raw.chars().next_back().filter(|_| raw.len() >= 2);
        let body_start = usize::from(is_quote(open));
        let body_end = match close {
            Some(ch) if is_quote(ch) => raw.len() - 1,
            _ => raw.len(),
        };
        let body = raw.get(body_start..body_end).unwrap_or("");
        if body.contains(quote) {
            return;
        }
        let replacement = quote.to_string();
        if is_quote(open) && open != quote {
            self.replace(value.start, value.start + 1, &replacement);
        }
        if let Some(_ch) = close.filter(|&ch| is_quote(ch) && ch != quote) {
            self.replace(value.end - 1, value.end, &replacement);
        }
    }
}
