//! MX Formatter
//!
//! Incremental formatter for markup documents.
//!
//! # Architecture
//!
//! The formatter never renders a new document. It walks the parsed tree once,
//! tracking how much of the current output line is still available, and
//! records the whitespace and quote replacements that bring the text to its
//! formatted form:
//!
//! 1. **Placement**: every node is put on its own line, joined to the
//!    previous content, or left where it is, by its parent's content category
//! 2. **Accounting**: everything that stays on the line is deducted from the
//!    running [`Constraints`] budget
//! 3. **Breaking**: attributes, words and inline markup that no longer fit
//!    move to a new line
//!
//! Markup that failed to parse is accounted for but never edited.
//!
//! # Modules
//!
//! - [`config`]: formatting preferences
//! - [`constraints`]: per-level width budget
//! - [`content_model`]: grammar oracle for mixed content
//! - [`edits`]: text edits, the ordered edit builder and `apply_edits`
//! - [`formatter`]: the formatting engine

pub mod config;
pub mod constraints;
pub mod content_model;
pub mod edits;
pub mod formatter;
mod stack;

pub use config::{
    ConfigError, EnforceQuoteStyle, FormatConfig, QuotePolicy, Quotation, MAX_LINE_WIDTH, TAB_SIZE,
};
pub use constraints::Constraints;
pub use content_model::{ContentModel, MixedContentSet};
pub use edits::{apply_edits, EditBuilder, TextEdit, TextRange};
pub use formatter::DocumentFormatter;

use mx_ir::{Document, Span};

/// Edits that format the whole of `doc`.
///
/// # Example
///
/// ```
/// use mx_fmt::{apply_edits, format_document, FormatConfig};
///
/// let doc = mx_parse::parse("<a>  <b/></a>").document;
/// let edits = format_document(&doc, &FormatConfig::default());
/// assert_eq!(apply_edits(doc.text(), &edits), "<a>\n  <b />\n</a>");
/// ```
pub fn format_document(doc: &Document, config: &FormatConfig) -> Vec<TextEdit> {
    DocumentFormatter::new(doc, config).format()
}

/// Edits that format the part of `doc` inside `range`.
///
/// Layout is computed as for the whole document, so the result matches the
/// corresponding part of a full format.
pub fn format_range(doc: &Document, config: &FormatConfig, range: Span) -> Vec<TextEdit> {
    DocumentFormatter::new(doc, config).with_range(range).format()
}
