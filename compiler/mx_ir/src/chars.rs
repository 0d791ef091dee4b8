//! Character classes shared by the parser and the formatter.
//!
//! Markup whitespace is the XML set: space, tab, carriage return and line
//! feed. Widths are measured in `char`s, which is what an editor column is
//! for the documents this workspace targets.

/// Space, tab, CR or LF.
#[inline]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
pub const fn is_line_break(b: u8) -> bool {
    matches!(b, b'\n' | b'\r')
}

/// `"` or `'`.
#[inline]
pub const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

/// First byte of an element or attribute name.
///
/// Any non-ASCII byte is accepted so names in other scripts are kept whole.
#[inline]
pub const fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b':') || b >= 0x80
}

#[inline]
pub const fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || matches!(b, b'-' | b'.')
}

/// True when every byte of `s` is markup whitespace (also for `""`).
pub fn is_blank(s: &str) -> bool {
    s.bytes().all(is_whitespace)
}

pub fn contains_line_break(s: &str) -> bool {
    s.bytes().any(is_line_break)
}

/// Number of line breaks in `s`; `\r\n` counts once.
pub fn count_line_breaks(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => count += 1,
            _ => {}
        }
        i += 1;
    }
    count
}

/// Display width of `s` in columns.
#[inline]
pub fn width(s: &str) -> usize {
    s.chars().count()
}

/// Width of the text after the last line break of `s`, or `None` when `s`
/// has no line break.
pub fn last_line_width(s: &str) -> Option<usize> {
    s.rfind(['\n', '\r']).map(|i| width(&s[i + 1..]))
}

/// Offset of the first non-whitespace byte at or after `from`, capped at
/// `to`.
pub fn skip_whitespace(text: &str, from: usize, to: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < to && is_whitespace(bytes[i]) {
        i += 1;
    }
    i
}

/// Offset where the whitespace run ending at `to` starts, never before
/// `from`.
pub fn whitespace_run_start(text: &str, from: usize, to: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = to;
    while i > from && is_whitespace(bytes[i - 1]) {
        i -= 1;
    }
    i
}

/// Every line break of `text` as `(offset, separator)`; `\r\n` is one
/// break.
pub fn line_breaks(text: &str) -> impl Iterator<Item = (usize, &'static str)> + '_ {
    let bytes = text.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() {
            let offset = i;
            let separator = match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => "\r\n",
                b'\r' => "\r",
                b'\n' => "\n",
                _ => {
                    i += 1;
                    continue;
                }
            };
            i += separator.len();
            return Some((offset, separator));
        }
        None
    })
}

/// The line separator used by `text`, decided by its first line break.
pub fn detect_line_separator(text: &str) -> &'static str {
    line_breaks(text).next().map_or("\n", |(_, separator)| separator)
}

/// True when `text` uses more than one kind of line separator.
pub fn mixes_line_separators(text: &str) -> bool {
    let mut separators = line_breaks(text).map(|(_, separator)| separator);
    separators
        .next()
        .is_some_and(|first| separators.any(|separator| separator != first))
}

#[cfg(test)]
mod tests;
