use super::*;

#[test]
fn test_whitespace_classes() {
    for b in [b' ', b'\t', b'\n', b'\r'] {
        assert!(is_whitespace(b));
    }
    // Form feed and NBSP are not markup whitespace.
    assert!(!is_whitespace(0x0c));
    assert!(!is_blank("\u{a0}"));
    assert!(is_blank(""));
    assert!(is_blank(" \r\n\t"));
}

#[test]
fn test_name_classes() {
    assert!(is_name_start(b'a'));
    assert!(is_name_start(b'_'));
    assert!(is_name_start(b':'));
    assert!(!is_name_start(b'1'));
    assert!(!is_name_start(b'-'));
    assert!(is_name_char(b'-'));
    assert!(is_name_char(b'.'));
    assert!(is_name_char(b'9'));
    assert!(!is_name_char(b'='));
    assert!(!is_name_char(b'>'));
}

#[test]
fn test_count_line_breaks() {
    assert_eq!(count_line_breaks("a"), 0);
    assert_eq!(count_line_breaks("\n\n"), 2);
    assert_eq!(count_line_breaks("\r\n\r\n"), 2);
    assert_eq!(count_line_breaks("\r\r\n\n"), 3);
}

#[test]
fn test_width_counts_chars() {
    assert_eq!(width("abc"), 3);
    assert_eq!(width("été"), 3);
    assert_eq!(last_line_width("abc"), None);
    assert_eq!(last_line_width("ab\ncde"), Some(3));
    assert_eq!(last_line_width("ab\r\n"), Some(0));
}

#[test]
fn test_whitespace_runs() {
    let text = "a  \n b";
    assert_eq!(skip_whitespace(text, 1, text.len()), 5);
    assert_eq!(skip_whitespace(text, 1, 3), 3);
    assert_eq!(whitespace_run_start(text, 0, 5), 1);
    assert_eq!(whitespace_run_start(text, 2, 5), 2);
    assert_eq!(whitespace_run_start(text, 0, 1), 1);
}

#[test]
fn test_detect_line_separator() {
    assert_eq!(detect_line_separator("<a/>"), "\n");
    assert_eq!(detect_line_separator("<a>\n</a>"), "\n");
    assert_eq!(detect_line_separator("<a>\r\n</a>\n"), "\r\n");
    assert_eq!(detect_line_separator("<a>\r</a>"), "\r");
}

#[test]
fn test_line_breaks() {
    let breaks: Vec<_> = line_breaks("a\r\nb\nc\rd").collect();
    assert_eq!(breaks, vec![(1, "\r\n"), (4, "\n"), (6, "\r")]);
    assert_eq!(line_breaks("abc").count(), 0);
}

#[test]
fn test_mixes_line_separators() {
    assert!(!mixes_line_separators(""));
    assert!(!mixes_line_separators("a\nb\n"));
    assert!(!mixes_line_separators("a\r\nb\r\n"));
    assert!(mixes_line_separators("a\r\nb\n"));
    assert!(mixes_line_separators("a\rb\n"));
}
