//! Line-width budget for one nesting level.

use crate::config::FormatConfig;

/// Available formatting space.
///
/// `Constraints` tracks, for the node being formatted:
/// - `indent_level`: nesting depth in indentation units
/// - `available_line_width`: columns left on the current output line; goes
///   negative once the line is already too long
/// - `max_line_width` and `tab_size`: fixed for the whole pass
///
/// # Usage Pattern
///
/// ```ignore
/// let mut c = Constraints::from_config(&config);
///
/// // Account for text that stays on the current line
/// c.consume(width("<element"));
///
/// // Children start one level deeper, continuing on the same line
/// let mut child = c.derive_for_child();
/// child.set_available_line_width(c.available_line_width());
///
/// // After a line break, the budget restarts at the indentation
/// child.start_line(child.indent_level());
/// ```
///
/// A value belongs to one recursion frame; siblings share it by `&mut`, one
/// after another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraints {
    indent_level: usize,
    available_line_width: isize,
    max_line_width: usize,
    tab_size: usize,
}

impl Constraints {
    /// Constraints at indent level 0 with the whole line available.
    pub fn new(max_line_width: usize, tab_size: usize) -> Self {
        Constraints {
            indent_level: 0,
            available_line_width: max_line_width as isize,
            max_line_width,
            tab_size,
        }
    }

    #[inline]
    pub fn from_config(config: &FormatConfig) -> Self {
        Constraints::new(config.max_line_width, config.tab_size)
    }

    /// Constraints for the children of the current node: one level deeper,
    /// with a fresh budget at that indentation. Callers continuing on the
    /// current line override the budget.
    #[inline]
    #[must_use = "derive_for_child returns new constraints for the children"]
    pub fn derive_for_child(&self) -> Self {
        let indent_level = self.indent_level + 1;
        Constraints {
            indent_level,
            available_line_width: self.width_at(indent_level),
            ..*self
        }
    }

    #[inline]
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    #[inline]
    pub fn available_line_width(&self) -> isize {
        self.available_line_width
    }

    #[inline]
    pub fn set_available_line_width(&mut self, width: isize) {
        self.available_line_width = width;
    }

    #[inline]
    pub fn max_line_width(&self) -> usize {
        self.max_line_width
    }

    #[inline]
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Width of a line that starts indented at `level`.
    #[inline]
    pub fn width_at(&self, level: usize) -> isize {
        self.max_line_width as isize - (self.tab_size * level) as isize
    }

    /// False when width-based breaking is disabled (`max_line_width == 0`).
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.max_line_width > 0
    }

    /// True once the current line is already past the limit.
    #[inline]
    pub fn overflows(&self) -> bool {
        self.is_bounded() && self.available_line_width < 0
    }

    /// True when `width` more columns would not fit on the current line.
    #[inline]
    pub fn would_overflow(&self, width: usize) -> bool {
        self.is_bounded() && self.available_line_width - (width as isize) < 0
    }

    /// Account for `width` columns emitted on the current line.
    #[inline]
    pub fn consume(&mut self, width: usize) {
        self.set_available_line_width(self.available_line_width() - width as isize);
    }

    /// Account for a line break followed by indentation at `level`.
    #[inline]
    pub fn start_line(&mut self, level: usize) {
        self.set_available_line_width(self.width_at(level));
    }

    /// Account for a line break followed by `width` columns of text that
    /// start at column zero.
    #[inline]
    pub fn continue_after_break(&mut self, width: usize) {
        self.set_available_line_width(self.max_line_width as isize - width as isize);
    }
}

#[cfg(test)]
mod tests;
