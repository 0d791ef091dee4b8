use pretty_assertions::assert_eq;

use super::*;
use crate::EndTag;

/// `<a x='1'>hi<b/></a>` built by hand.
fn sample() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new("<a x='1'>hi<b/></a>");
    let mut a = Element::new(Span::new(1, 2));
    a.attributes.push(Attribute {
        name: Span::new(3, 4),
        delimiter: Some(4),
        value: Some(Span::new(5, 8)),
    });
    a.start_tag_end = Some(9);
    a.end_tag = Some(EndTag {
        open: 15,
        name: Span::new(17, 18),
        close: Some(18),
    });
    let a = doc.alloc(NodeKind::Element(a), Span::new(0, 19), None);
    doc.alloc(NodeKind::Text, Span::new(9, 11), Some(a));
    let mut b = Element::new(Span::new(12, 13));
    b.flags |= ElementFlags::SELF_CLOSING;
    b.start_tag_end = Some(15);
    let b = doc.alloc(NodeKind::Element(b), Span::new(11, 15), Some(a));
    (doc, a, b)
}

#[test]
fn test_alloc_links_parent_and_children() {
    let (doc, a, b) = sample();
    assert_eq!(doc.roots(), &[a]);
    assert_eq!(doc.children(a).len(), 2);
    assert_eq!(doc.node(b).parent, Some(a));
    assert_eq!(doc.node_count(), 3);
}

#[test]
fn test_alloc_updates_content_flags() {
    let (doc, a, b) = sample();
    let Some(element) = doc.node(a).as_element() else {
        panic!("expected element");
    };
    assert!(element.has_text());
    assert!(element.has_markup());
    let Some(child) = doc.node(b).as_element() else {
        panic!("expected element");
    };
    assert!(child.is_self_closing());
    assert!(!child.has_text());
}

#[test]
fn test_blank_text_does_not_set_has_text() {
    let mut doc = Document::new("<a> \n </a>");
    let a = doc.alloc(NodeKind::Element(Element::new(Span::new(1, 2))), Span::new(0, 10), None);
    let text = doc.alloc(NodeKind::Text, Span::new(3, 6), Some(a));
    assert!(doc.is_blank_text(text));
    let Some(element) = doc.node(a).as_element() else {
        panic!("expected element");
    };
    assert!(!element.has_text());
    assert!(!element.has_markup());
}

#[test]
fn test_attribute_accessors() {
    let (doc, a, _) = sample();
    let Some(element) = doc.node(a).as_element() else {
        panic!("expected element");
    };
    assert_eq!(doc.element_name(element), "a");
    let Some(x) = doc.find_attribute(element, "x") else {
        panic!("expected attribute x");
    };
    assert_eq!(doc.attribute_name(x), "x");
    assert_eq!(doc.original_value(x), Some("'1'"));
    assert_eq!(doc.attribute_value(x), Some("1"));
    assert_eq!(x.end(), 8);
    assert!(doc.find_attribute(element, "y").is_none());
    assert_eq!(element.attributes_end(), 8);
}

#[test]
fn test_unquote() {
    assert_eq!(unquote("\"abc\""), "abc");
    assert_eq!(unquote("'abc'"), "abc");
    assert_eq!(unquote("'abc"), "abc");
    assert_eq!(unquote("'abc\""), "abc\"");
    assert_eq!(unquote("abc"), "abc");
    assert_eq!(unquote("'"), "");
}

#[test]
fn test_slice_out_of_bounds_is_empty() {
    let doc = Document::new("<a/>");
    assert_eq!(doc.slice(Span::new(0, 2)), "<a");
    assert_eq!(doc.slice(Span::new(2, 99)), "");
}

#[test]
fn test_end_tag_span() {
    let closed = EndTag {
        open: 10,
        name: Span::new(12, 13),
        close: Some(14),
    };
    assert_eq!(closed.span(), Span::new(10, 15));
    let open = EndTag {
        open: 10,
        name: Span::new(12, 13),
        close: None,
    };
    assert_eq!(open.end(), 13);
}
