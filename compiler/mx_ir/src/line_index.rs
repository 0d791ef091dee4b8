//! Offset ↔ line/character conversion.

use std::fmt;

/// Zero-based line and character (in `char`s) position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

impl fmt::Display for Position {
    /// One-based `line:column`, the form editors print.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Start offsets of every line of a text.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 1;
                    line_starts.push(i as u32 + 1);
                }
                b'\r' | b'\n' => line_starts.push(i as u32 + 1),
                _ => {}
            }
            i += 1;
        }
        LineIndex {
            line_starts,
            len: text.len() as u32,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        let offset = offset.min(self.len);
        (self.line_starts.partition_point(|&start| start <= offset) - 1) as u32
    }

    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Position of `offset` in `text`, which must be the indexed text.
    pub fn position(&self, text: &str, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let start = self.line_starts[line as usize];
        let character = text
            .get(start as usize..offset as usize)
            .map_or(0, |s| s.chars().count());
        Position::new(line, character as u32)
    }

    /// Byte offset of `position` in `text`. Characters past the end of the
    /// line clamp to the line end; lines past the end clamp to the text end.
    pub fn offset(&self, text: &str, position: Position) -> u32 {
        let Some(start) = self.line_start(position.line) else {
            return self.len;
        };
        let end = self
            .line_start(position.line + 1)
            .unwrap_or(self.len);
        let line = text.get(start as usize..end as usize).unwrap_or("");
        let content = line.trim_end_matches(['\n', '\r']);
        let within = content
            .char_indices()
            .nth(position.character as usize)
            .map_or(content.len(), |(i, _)| i);
        start + within as u32
    }
}
