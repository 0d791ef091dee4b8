//! Property-based tests for the lenient parser.
//!
//! Arbitrary text must always parse, and the tree must respect the span
//! invariants the formatter relies on:
//! 1. every span is a char-boundary slice of the text
//! 2. children lie inside their parent, in order, without overlap
//! 3. attribute values lie after their delimiter, which lies after the name

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use mx_ir::{Document, NodeId, Span};
use mx_parse::parse;
use proptest::prelude::*;

fn check_span(doc: &Document, span: Span) {
    assert!(span.start <= span.end, "inverted span {span}");
    assert!(
        doc.text().get(span.to_range()).is_some(),
        "span {span} is not a valid slice"
    );
}

fn check_node(doc: &Document, id: NodeId) {
    let node = doc.node(id);
    check_span(doc, node.span);
    if let Some(element) = node.as_element() {
        check_span(doc, element.name);
        for attribute in &element.attributes {
            check_span(doc, attribute.name);
            if let Some(delimiter) = attribute.delimiter {
                assert!(attribute.name.end <= delimiter);
                if let Some(value) = attribute.value {
                    check_span(doc, value);
                    assert!(delimiter < value.start);
                }
            }
        }
    }
    let mut previous_end = node.span.start;
    for &child in &node.children {
        let span = doc.node(child).span;
        assert!(span.start >= previous_end, "child {span} overlaps sibling");
        assert!(node.span.contains_span(span), "child {span} escapes parent");
        previous_end = span.end;
        check_node(doc, child);
    }
}

/// Markup-heavy fragments, so the generated text hits tag paths often.
fn markup_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("<a>".to_owned()),
        Just("</a>".to_owned()),
        Just("<b x='1'>".to_owned()),
        Just("</b>".to_owned()),
        Just("<c/>".to_owned()),
        Just("<!--".to_owned()),
        Just("-->".to_owned()),
        Just("<?xml version=\"1.0\"?>".to_owned()),
        Just("<![CDATA[".to_owned()),
        Just("]]>".to_owned()),
        Just("\"".to_owned()),
        Just("=".to_owned()),
        Just("<".to_owned()),
        Just(">".to_owned()),
        "[a-z é\n\t]{0,6}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parse_never_breaks_span_invariants(text in markup_strategy()) {
        let out = parse(&text);
        let doc = &out.document;
        let mut previous_end = 0;
        for &root in doc.roots() {
            let span = doc.node(root).span;
            prop_assert!(span.start >= previous_end);
            previous_end = span.end;
            check_node(doc, root);
        }
    }

    #[test]
    fn parse_accepts_any_text(text in any::<String>()) {
        let out = parse(&text);
        for problem in &out.problems {
            check_span(&out.document, problem.span);
        }
    }
}
