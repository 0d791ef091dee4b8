use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builder_keeps_document_order() {
    let mut builder = EditBuilder::new();
    assert!(builder.replace(2, 4, " "));
    assert!(builder.replace(4, 4, "\n"));
    assert!(builder.replace(4, 4, "  "));
    assert!(builder.replace(10, 12, ""));
    assert_eq!(
        builder.finish(),
        vec![
            TextEdit::new(2, 4, " "),
            TextEdit::new(4, 4, "\n"),
            TextEdit::new(4, 4, "  "),
            TextEdit::new(10, 12, ""),
        ]
    );
}

#[test]
fn test_builder_drops_overlaps() {
    let mut builder = EditBuilder::new();
    assert!(builder.replace(5, 10, ""));
    assert!(!builder.replace(7, 12, "x"));
    assert!(!builder.replace(0, 1, "x"));
    assert_eq!(builder.finish(), vec![TextEdit::new(5, 10, "")]);
}

#[test]
fn test_builder_range_filter() {
    let mut builder = EditBuilder::with_range(Span::new(10, 20));
    assert!(!builder.replace(5, 11, " "));
    assert!(builder.replace(10, 12, " "));
    assert!(builder.replace(20, 20, "\n"));
    assert!(!builder.replace(19, 21, ""));
    assert_eq!(
        builder.finish(),
        vec![TextEdit::new(10, 12, " "), TextEdit::new(20, 20, "\n")]
    );
}

#[test]
fn test_apply_edits() {
    let text = "<a  x='1'>t</a>";
    let edits = [
        TextEdit::new(2, 4, " "),
        TextEdit::new(6, 7, "\""),
        TextEdit::new(8, 9, "\""),
    ];
    assert_eq!(apply_edits(text, &edits), "<a x=\"1\">t</a>");
}

#[test]
fn test_apply_edits_same_offset_inserts_in_order() {
    let edits = [TextEdit::new(1, 1, "x"), TextEdit::new(1, 1, "y")];
    assert_eq!(apply_edits("ab", &edits), "axyb");
}

#[test]
fn test_apply_edits_skips_invalid() {
    let edits = [
        TextEdit::new(1, 3, "-"),
        TextEdit::new(2, 3, "overlap"),
        TextEdit::new(3, 99, "past end"),
    ];
    assert_eq!(apply_edits("abcd", &edits), "a-d");
    // Splitting 'é' is refused.
    assert_eq!(apply_edits("é", &[TextEdit::new(1, 2, "")]), "é");
}

#[test]
fn test_edit_range() {
    let text = "<a>\r\n  <b/>\r\n</a>";
    let index = LineIndex::new(text);
    let edit = TextEdit::new(3, 7, "\r\n    ");
    let range = edit.range(text, &index);
    assert_eq!(range.start, Position::new(0, 3));
    assert_eq!(range.end, Position::new(1, 2));
}

#[test]
fn test_edit_display() {
    assert_eq!(TextEdit::new(1, 2, "\n").to_string(), "1..2 => \"\\n\"");
}
