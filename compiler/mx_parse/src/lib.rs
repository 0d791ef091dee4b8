//! MX Parse - lenient markup parser.
//!
//! Turns any text into an [`mx_ir::Document`]. Parsing never fails: broken
//! constructs are recovered locally and reported as [`Problem`]s, so the
//! formatter can still work on the parts that make sense.
//!
//! # Modules
//!
//! - `cursor`: byte cursor with `memchr` searches
//! - `parser`: the single-pass tree builder
//! - `problem`: [`Problem`] and [`ProblemKind`]

mod cursor;
mod parser;
mod problem;

use mx_ir::{Document, Span};

pub use problem::{Problem, ProblemKind};

/// Result of [`parse`]: the tree plus everything that had to be recovered.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub document: Document,
    pub problems: Vec<Problem>,
}

impl ParseOutput {
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// Parse `text` into a document tree.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn parse(text: &str) -> ParseOutput {
    if u32::try_from(text.len()).is_err() {
        return ParseOutput {
            document: Document::new(text),
            problems: vec![Problem::new(
                ProblemKind::DocumentTooLarge(text.len()),
                Span::new(0, 0),
            )],
        };
    }
    let (document, problems) = parser::Parser::new(text).run();
    tracing::debug!(
        nodes = document.node_count(),
        problems = problems.len(),
        "parsed document"
    );
    ParseOutput { document, problems }
}
