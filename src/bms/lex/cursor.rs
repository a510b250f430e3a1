//! A line cursor over the chart source.

use std::ops::Range;

/// Walks the source line by line, yielding each trimmed line with its byte range.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line.
pub struct Cursor<'a> {
    /// The index position.
    index: usize,
    /// The line position, starts with 1.
    line: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            index: 0,
            line: 1,
            source,
        }
    }

    /// Returns `true` if every line has been read.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Returns the line number of the line that will be read next, starts with 1.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Determine the end of the current line.
    ///
    /// Returns a tuple `(content_end, next_index)` where `content_end` is the absolute byte index
    /// where the line content ends (exclusive), and `next_index` is the index where the next line
    /// starts, after the line terminator.
    fn current_line_bounds(&self) -> (usize, usize) {
        let rest = &self.source[self.index..];
        let Some(offset) = rest.find(['\n', '\r']) else {
            return (self.source.len(), self.source.len());
        };
        let content_end = self.index + offset;
        let terminator_len = if rest[offset..].starts_with("\r\n") {
            2
        } else {
            1
        };
        (content_end, content_end + terminator_len)
    }

    /// Move cursor through the current line and return it trimmed, with the range of the trimmed
    /// content.
    pub fn next_line(&mut self) -> Option<(Range<usize>, &'a str)> {
        if self.is_end() {
            return None;
        }
        let (content_end, next_index) = self.current_line_bounds();
        let raw = &self.source[self.index..content_end];
        let leading = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        let start = self.index + leading;
        self.index = next_index;
        self.line += 1;
        Some((start..start + trimmed.len(), trimmed))
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = (Range<usize>, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
