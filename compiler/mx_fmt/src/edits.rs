//! Text edits and the builder that keeps them ordered.
//!
//! The formatter never produces the output text itself. It appends
//! [`TextEdit`]s to an [`EditBuilder`] in document order; callers translate
//! them to line/character ranges or apply them with [`apply_edits`].

use std::fmt;

use mx_ir::{LineIndex, Position, Span};

/// Replace the bytes `start..end` of the original text with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TextEdit {
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

/// A zero-based line/character range, the form editors apply edits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextEdit {
    pub fn new(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        TextEdit {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Positions of this edit in `text`, which `index` was built from.
    pub fn range(&self, text: &str, index: &LineIndex) -> TextRange {
        TextRange {
            start: index.position(text, self.start),
            end: index.position(text, self.end),
        }
    }
}

impl fmt::Display for TextEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} => {:?}", self.start, self.end, self.new_text)
    }
}

/// Collects the edits of one pass.
///
/// Edits must arrive in document order. An edit starting before the end of
/// the previous one is dropped, so the result never overlaps. With a range
/// set, edits not entirely inside it are dropped as well.
#[derive(Clone, Debug, Default)]
pub struct EditBuilder {
    edits: Vec<TextEdit>,
    range: Option<Span>,
}

impl EditBuilder {
    pub fn new() -> Self {
        EditBuilder::default()
    }

    /// A builder that keeps only edits lying inside `range`.
    pub fn with_range(range: Span) -> Self {
        EditBuilder {
            edits: Vec::new(),
            range: Some(range),
        }
    }

    /// Queue a replacement. Returns `false` when the edit was dropped.
    pub fn replace(&mut self, start: u32, end: u32, new_text: impl Into<String>) -> bool {
        debug_assert!(start <= end, "inverted edit {start}..{end}");
        let span = Span::new(start, end);
        if let Some(range) = self.range {
            if !range.contains_span(span) {
                return false;
            }
        }
        if let Some(last) = self.edits.last() {
            if start < last.end {
                tracing::trace!(%span, previous = %last.span(), "dropping overlapping edit");
                return false;
            }
        }
        self.edits.push(TextEdit::new(start, end, new_text));
        true
    }

    pub fn finish(self) -> Vec<TextEdit> {
        self.edits
    }
}

/// Apply ordered, non-overlapping edits to `text`.
///
/// Edits that overlap an earlier one, fall outside the text or split a
/// character are skipped.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    if edits.is_empty() {
        return text.to_string();
    }
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        let (start, end) = (edit.start as usize, edit.end as usize);
        let valid = cursor <= start
            && start <= end
            && end <= text.len()
            && text.is_char_boundary(start)
            && text.is_char_boundary(end);
        if !valid {
            continue;
        }
        result.push_str(&text[cursor..start]);
        result.push_str(&edit.new_text);
        cursor = end;
    }
    result.push_str(&text[cursor..]);
    result
}

#[cfg(test)]
mod tests;
