use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_empty() {
    let span = Span::new(7, 7);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
    assert!(!span.contains(7));
}

#[test]
fn test_span_contains_span() {
    let outer = Span::new(0, 50);
    assert!(outer.contains_span(Span::new(0, 50)));
    assert!(outer.contains_span(Span::new(10, 20)));
    assert!(!outer.contains_span(Span::new(40, 51)));
}

#[test]
fn test_span_touches() {
    let span = Span::new(10, 20);
    assert!(span.touches(Span::new(15, 30)));
    assert!(span.touches(Span::new(0, 11)));
    assert!(!span.touches(Span::new(21, 30)));
    assert!(!span.touches(Span::new(0, 9)));
    // Shared boundaries count.
    assert!(span.touches(Span::new(20, 30)));
    assert!(span.touches(Span::new(0, 10)));
    assert!(span.touches(Span::new(10, 10)));
    assert!(span.touches(Span::new(20, 20)));
    assert!(!span.touches(Span::new(21, 21)));
}

#[test]
fn test_span_from_range() {
    let span = Span::from_range(100..200);
    assert_eq!(span.start, 100);
    assert_eq!(span.end, 200);
    assert_eq!(span.to_range(), 100..200);
}

#[test]
fn test_span_u32_max_boundaries() {
    let span = Span::new(u32::MAX - 10, u32::MAX);
    assert_eq!(span.len(), 10);
    assert!(span.contains(u32::MAX - 5));
    assert!(!span.contains(u32::MAX));
}

#[test]
fn test_span_display() {
    assert_eq!(format!("{}", Span::new(3, 9)), "3..9");
    assert_eq!(format!("{:?}", Span::new(3, 9)), "3..9");
}
