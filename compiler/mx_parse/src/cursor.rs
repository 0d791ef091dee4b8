//! Byte cursor over the document text.
//!
//! Reads past the end yield `0x00`, which no byte class accepts, so scanning
//! loops stop at EOF without explicit bounds checks. Interior NUL bytes are
//! told apart from EOF by [`Cursor::is_eof`].

use memchr::memmem;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Cursor {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte one position ahead of current.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub(crate) fn byte_at(&self, pos: usize) -> u8 {
        self.bytes.get(pos).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.bytes.len());
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.set_pos(self.pos + n);
    }

    /// Advance over one whole UTF-8 character.
    pub(crate) fn advance_char(&mut self) {
        let width = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        self.advance_n(width);
    }

    /// The character at the current position, for problem messages.
    pub(crate) fn current_char(&self) -> char {
        std::str::from_utf8(&self.bytes[self.pos..])
            .ok()
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(prefix)
    }

    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn eat_whitespace(&mut self) {
        self.eat_while(mx_ir::chars::is_whitespace);
    }

    /// Absolute offset of the next occurrence of `needle` at or after the
    /// current position.
    pub(crate) fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.bytes[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Absolute offset of the next `a` or `b`.
    pub(crate) fn find2(&self, a: u8, b: u8) -> Option<usize> {
        memchr::memchr2(a, b, &self.bytes[self.pos..]).map(|i| self.pos + i)
    }

    /// Absolute offset of the next `byte` before `limit`.
    pub(crate) fn find_before(&self, byte: u8, limit: usize) -> Option<usize> {
        let limit = limit.min(self.bytes.len()).max(self.pos);
        memchr::memchr(byte, &self.bytes[self.pos..limit]).map(|i| self.pos + i)
    }
}
