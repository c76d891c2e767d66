//! Source positions and code building for icu-ts.
//!
//! This crate provides byte spans into translation patterns, a line index for
//! reporting positions inside multi-line patterns, and an indentation-aware
//! builder used to emit the generated TypeScript modules.

use std::ops::Range;

/// A span in a pattern, representing a half-open byte range [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Start offset (inclusive)
    pub start: u32,
    /// End offset (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span from start and end offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create an empty span at the given offset.
    #[inline]
    pub const fn empty(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Create a span from a range.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start as u32,
            end: range.end as u32,
        }
    }

    /// Move the span right by `offset` bytes.
    ///
    /// Nested groups are parsed from a substring; their spans are shifted
    /// back into the coordinates of the enclosing pattern.
    #[inline]
    pub const fn shift(self, offset: u32) -> Span {
        Span {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Merge two spans into one that covers both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice the text covered by this span out of `source`.
    #[inline]
    pub fn slice(self, source: &str) -> &str {
        &source[self.to_range()]
    }

    /// Convert to a Range<usize>.
    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range)
    }
}

/// A line index for converting between byte offsets and line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets of the start of each line.
    line_starts: Vec<u32>,
    /// Total length of the source.
    len: u32,
}

impl LineIndex {
    /// Create a new line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self {
            line_starts,
            len: text.len() as u32,
        }
    }

    /// Get the line and column for a byte offset.
    /// Line and column are 0-indexed.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        LineCol {
            line: line as u32,
            col: offset - line_start,
        }
    }
}

/// A line and column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column (byte offset within line).
    pub col: u32,
}

impl LineCol {
    /// Convert to 1-indexed for display.
    #[inline]
    pub const fn to_display(self) -> (u32, u32) {
        (self.line + 1, self.col + 1)
    }
}

/// One level of indentation in generated code.
const INDENT: &str = "    ";

/// Builder for generated source text.
///
/// Lines written through [`CodeBuilder::line`] are prefixed with the current
/// indentation; [`CodeBuilder::push_str`] appends raw text.
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    code: String,
    indent: usize,
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBuilder {
    /// Create a new code builder.
    pub fn new() -> Self {
        Self {
            code: String::new(),
            indent: 0,
        }
    }

    /// Append code verbatim.
    pub fn push_str(&mut self, code: &str) {
        self.code.push_str(code);
    }

    /// Append an indented line terminated by a newline.
    pub fn line(&mut self, code: &str) {
        if !code.is_empty() {
            for _ in 0..self.indent {
                self.code.push_str(INDENT);
            }
            self.code.push_str(code);
        }
        self.newline();
    }

    /// Append a newline.
    pub fn newline(&mut self) {
        self.code.push('\n');
    }

    /// Increase the indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease the indentation level.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Consume the builder and return the code.
    pub fn finish(self) -> String {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_shift_and_merge() {
        let span = Span::new(2, 5).shift(10);
        assert_eq!(span, Span::new(12, 15));

        let merged = Span::new(10, 20).merge(Span::new(15, 30));
        assert_eq!(merged, Span::new(10, 30));
    }

    #[test]
    fn test_span_slice() {
        let source = "Hi {name}!";
        assert_eq!(Span::new(3, 9).slice(source), "{name}");
        assert_eq!(Span::from(4..8).slice(source), "name");
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("hello\nworld\nfoo");

        assert_eq!(index.line_col(0).to_display(), (1, 1));
        assert_eq!(index.line_col(5).to_display(), (1, 6));
        assert_eq!(index.line_col(6).to_display(), (2, 1));
        assert_eq!(index.line_col(12), LineCol { line: 2, col: 0 });
        // Past the end clamps to the last position
        assert_eq!(index.line_col(99), LineCol { line: 2, col: 3 });
    }

    #[test]
    fn test_code_builder_indentation() {
        let mut builder = CodeBuilder::new();
        builder.line("switch (x) {");
        builder.indent();
        builder.line("case 1: return 1");
        builder.line("");
        builder.dedent();
        builder.dedent();
        builder.push_str("}");
        builder.newline();

        assert_eq!(builder.finish(), "switch (x) {\n    case 1: return 1\n\n}\n");
    }
}
