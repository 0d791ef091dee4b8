//! Formatter Core
//!
//! Walks the document tree depth-first and emits the edits that bring its
//! text to formatted form. Only whitespace and quote characters are ever
//! replaced; names, values, text and unparseable markup stay as written.
//!
//! # Algorithm
//!
//! 1. Each element is placed relative to its previous sibling according to
//!    the parent's [`Category`](category::Category)
//! 2. Its start tag is measured and its attributes placed one by one
//! 3. Its children are formatted with constraints one level deeper
//! 4. Its end tag is placed after the last child
//!
//! Every step updates the running [`Constraints`] with the width of what
//! the output line will hold, so breaking decisions are made on the
//! formatted layout and a second pass finds nothing to change.
//!
//! # Modules
//!
//! - `category`: content categories of elements
//! - `attribute`: attribute placement, delimiters and quotes
//! - `text`: text reflow and attribute value widths
//! - `element`: the recursion driver: tags, children and end tags

mod attribute;
mod category;
mod element;
mod text;

use mx_ir::chars::{
    contains_line_break, count_line_breaks, detect_line_separator, is_blank, last_line_width,
    line_breaks, mixes_line_separators, whitespace_run_start, width,
};
use mx_ir::{Document, Span};

use crate::config::{FormatConfig, QuotePolicy};
use crate::constraints::Constraints;
use crate::content_model::ContentModel;
use crate::edits::{EditBuilder, TextEdit};
use category::Category;
use element::Trailing;

/// Formats one document.
///
/// ```ignore
/// let edits = DocumentFormatter::new(&doc, &config)
///     .with_content_model(&schema)
///     .with_range(selection)
///     .format();
/// ```
#[derive(Clone, Copy)]
pub struct DocumentFormatter<'a> {
    doc: &'a Document,
    config: &'a FormatConfig,
    model: Option<&'a dyn ContentModel>,
    range: Option<Span>,
}

impl<'a> DocumentFormatter<'a> {
    pub fn new(doc: &'a Document, config: &'a FormatConfig) -> Self {
        DocumentFormatter {
            doc,
            config,
            model: None,
            range: None,
        }
    }

    /// Bind a grammar oracle, consulted when `grammar_aware_formatting` is
    /// on.
    #[must_use]
    pub fn with_content_model(mut self, model: &'a dyn ContentModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Emit only edits lying inside `range`. Layout is still computed from
    /// the root.
    #[must_use]
    pub fn with_range(mut self, range: Span) -> Self {
        self.range = Some(range);
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(range = ?self.range))]
    pub fn format(&self) -> Vec<TextEdit> {
        let text = self.doc.text();
        let detected = detect_line_separator(text);
        let line_separator = if mixes_line_separators(text) {
            let full = self.run(detected, None);
            let surviving = surviving_line_separator(text, &full).unwrap_or(detected);
            if surviving == detected && self.range.is_none() {
                return full;
            }
            surviving
        } else {
            detected
        };
        let edits = self.run(line_separator, self.range);
        tracing::debug!(edits = edits.len(), "formatted document");
        edits
    }

    fn run(&self, line_separator: &'static str, range: Option<Span>) -> Vec<TextEdit> {
        let mut ctx = FormatContext {
            doc: self.doc,
            config: self.config,
            model: self.model,
            range,
            quotes: self.config.quote_policy(),
            line_separator,
            edits: range.map_or_else(EditBuilder::new, EditBuilder::with_range),
        };
        ctx.format_document();
        ctx.edits.finish()
    }
}

/// Separator of the first line break in `text` that none of `edits`
/// replaces. Inserted breaks use the separator formatting is run with, so
/// running with this one makes the output agree with its own first break.
fn surviving_line_separator(text: &str, edits: &[TextEdit]) -> Option<&'static str> {
    line_breaks(text).find_map(|(offset, separator)| {
        let offset = offset as u32;
        let before = edits.partition_point(|edit| edit.start <= offset);
        let replaced = before > 0 && edits[before - 1].end > offset;
        (!replaced).then_some(separator)
    })
}

/// State of one formatting pass.
pub(crate) struct FormatContext<'a> {
    doc: &'a Document,
    config: &'a FormatConfig,
    model: Option<&'a dyn ContentModel>,
    range: Option<Span>,
    quotes: QuotePolicy,
    line_separator: &'static str,
    edits: EditBuilder,
}

impl<'a> FormatContext<'a> {
    fn format_document(&mut self) {
        let doc = self.doc;
        let mut c = Constraints::from_config(self.config);
        let trailing = self.format_children(doc.roots(), Category::IgnoreSpace, &mut c, 0, true);
        self.format_document_end(trailing);
    }

    /// Trailing whitespace and the final line separator.
    fn format_document_end(&mut self, trailing: Trailing) {
        let end = self.doc.len();
        let tail_start = trailing.end;
        if !is_blank(self.slice(tail_start, end)) {
            return;
        }
        let has_content = !trailing.is_empty();
        if self.config.trim_final_newlines {
            let new_text = if self.config.insert_final_newline && has_content {
                self.line_separator
            } else {
                ""
            };
            self.replace(tail_start, end, new_text);
        } else if self.config.insert_final_newline
            && has_content
            && !contains_line_break(self.slice(tail_start, end))
        {
            self.replace(end, end, self.line_separator);
        }
    }

    // === Text access ===

    #[inline]
    fn slice(&self, start: u32, end: u32) -> &'a str {
        self.doc.slice(Span::new(start, end))
    }

    /// True when formatting a range that `span` does not touch. A span
    /// ending or starting exactly on a range boundary still touches it, so
    /// insertions at that offset are kept.
    #[inline]
    fn outside_range(&self, span: Span) -> bool {
        self.range.is_some_and(|range| !range.touches(span))
    }

    // === Edits ===

    /// Replace `start..end` unless it already reads `new_text`.
    fn replace(&mut self, start: u32, end: u32, new_text: &str) {
        if self.slice(start, end) != new_text {
            self.edits.replace(start, end, new_text);
        }
    }

    fn indentation(&self, level: usize) -> String {
        if self.config.insert_spaces {
            " ".repeat(self.config.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }

    /// `newlines` line separators followed by indentation for `level`.
    fn line_break(&self, level: usize, newlines: usize) -> String {
        let mut text = self.line_separator.repeat(newlines);
        text.push_str(&self.indentation(level));
        text
    }

    /// Line breaks kept for `gap`: at least one, and at most
    /// `preserved_newlines` blank lines.
    fn kept_line_breaks(&self, gap: &str) -> usize {
        count_line_breaks(gap).clamp(1, self.config.preserved_newlines.saturating_add(1))
    }

    /// Replace the whitespace directly before `to` (not reaching back past
    /// `from`) with a line break and indentation.
    fn replace_with_indentation(&mut self, from: u32, to: u32, level: usize) {
        let run_start = self.whitespace_run_start(from, to);
        let new_text = self.line_break(level, 1);
        self.replace(run_start, to, &new_text);
    }

    /// Collapse the whitespace directly before `to` into one space. A
    /// space is inserted only when nothing at all separates `from` and `to`.
    fn collapse_to_space(&mut self, from: u32, to: u32) {
        let run_start = self.whitespace_run_start(from, to);
        if run_start < to || from == to {
            self.replace(run_start, to, " ");
        }
    }

    /// Remove the whitespace directly before `to`.
    fn remove_whitespace(&mut self, from: u32, to: u32) {
        let run_start = self.whitespace_run_start(from, to);
        self.replace(run_start, to, "");
    }

    fn whitespace_run_start(&self, from: u32, to: u32) -> u32 {
        whitespace_run_start(self.doc.text(), from as usize, to as usize) as u32
    }

    // === Width accounting ===

    /// Account for `start..end` copied to the output unchanged.
    fn account(&self, c: &mut Constraints, start: u32, end: u32) {
        let text = self.slice(start, end);
        match last_line_width(text) {
            Some(last) => c.continue_after_break(last),
            None => c.consume(width(text)),
        }
    }
}
