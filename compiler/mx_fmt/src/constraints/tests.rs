use super::*;

#[test]
fn test_new_has_full_width() {
    let c = Constraints::new(80, 2);
    assert_eq!(c.indent_level(), 0);
    assert_eq!(c.available_line_width(), 80);
    assert!(c.is_bounded());
    assert!(!c.overflows());
}

#[test]
fn test_derive_for_child_resets_budget() {
    let mut c = Constraints::new(20, 4);
    c.consume(15);
    let child = c.derive_for_child();
    assert_eq!(child.indent_level(), 1);
    assert_eq!(child.available_line_width(), 16);
    assert_eq!(child.max_line_width(), 20);
    assert_eq!(child.tab_size(), 4);
    let grandchild = child.derive_for_child();
    assert_eq!(grandchild.available_line_width(), 12);
    // The parent is untouched.
    assert_eq!(c.available_line_width(), 5);
}

#[test]
fn test_consume_goes_negative() {
    let mut c = Constraints::new(6, 2);
    c.consume(5);
    assert!(!c.overflows());
    assert!(c.would_overflow(2));
    assert!(!c.would_overflow(1));
    c.consume(3);
    assert_eq!(c.available_line_width(), -2);
    assert!(c.overflows());
}

#[test]
fn test_unbounded_never_overflows() {
    let mut c = Constraints::new(0, 2);
    c.consume(1_000);
    assert!(!c.is_bounded());
    assert!(!c.overflows());
    assert!(!c.would_overflow(usize::MAX / 2));
}

#[test]
fn test_start_line_and_continue_after_break() {
    let mut c = Constraints::new(20, 4);
    c.consume(30);
    c.start_line(2);
    assert_eq!(c.available_line_width(), 12);
    c.continue_after_break(7);
    assert_eq!(c.available_line_width(), 13);
    assert_eq!(c.width_at(3), 8);
}

#[test]
fn test_from_config() {
    let config = FormatConfig::default().with_max_line_width(40).with_tab_size(3);
    let c = Constraints::from_config(&config);
    assert_eq!(c.available_line_width(), 40);
    assert_eq!(c.width_at(1), 37);
}
