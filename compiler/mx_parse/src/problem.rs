//! Problems found while parsing.
//!
//! The parser never fails; it records what it had to work around and keeps
//! going. Callers decide whether problems are worth reporting.

use mx_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProblemKind {
    #[error("comment is never closed")]
    UnclosedComment,
    #[error("CDATA section is never closed")]
    UnclosedCData,
    #[error("declaration is never closed")]
    UnclosedDeclaration,
    #[error("processing instruction is never closed")]
    UnclosedProcessingInstruction,
    #[error("start tag `<{0}` is never closed")]
    UnclosedStartTag(String),
    #[error("element `{0}` has no end tag")]
    UnclosedElement(String),
    #[error("end tag `</{0}` is missing `>`")]
    UnclosedEndTag(String),
    #[error("end tag `</{0}>` does not match any open element")]
    OrphanEndTag(String),
    #[error("attribute value is missing its closing quote")]
    UnterminatedQuote,
    #[error("attribute value is not quoted")]
    UnquotedValue,
    #[error("attribute `{0}` has `=` but no value")]
    MissingValue(String),
    #[error("unexpected character `{0}` in tag")]
    StrayCharacter(char),
    #[error("document is {0} bytes, larger than the 4 GiB limit")]
    DocumentTooLarge(usize),
}

/// A located [`ProblemKind`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct Problem {
    pub kind: ProblemKind,
    pub span: Span,
}

impl Problem {
    pub fn new(kind: ProblemKind, span: Span) -> Self {
        Problem { kind, span }
    }
}
