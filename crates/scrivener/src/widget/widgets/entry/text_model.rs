//! Row/column addressable text storage.
//!
//! [`TextBuffer`] stores text in a rope and addresses it by codepoint. Rows are
//! separated by any Unicode line break (LF, CR, CRLF, VT, FF, NEL, LS, PS); a
//! row's length never includes its terminator, so a column is always a valid
//! insertion point. Text ending in a line break has a trailing empty row.

use std::ops::Range;

use ropey::{Rope, RopeSlice};
use unicode_segmentation::UnicodeSegmentation;

use super::selection::CursorPosition;

/// Codepoints that end a row.
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Number of trailing codepoints of `line` that form its line break.
fn line_break_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    let last = line.char(len - 1);
    if last == '\n' && len >= 2 && line.char(len - 2) == '\r' {
        2
    } else if is_line_break(last) {
        1
    } else {
        0
    }
}

/// Text content of an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// The whole content as a string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in codepoints.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Number of rows; never zero.
    pub fn row_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Index of the last row.
    pub fn last_row(&self) -> usize {
        self.row_count().saturating_sub(1)
    }

    /// Codepoint range of `row`, excluding its line break. Clamped to the last row.
    pub fn row_range(&self, row: usize) -> Range<usize> {
        let row = row.min(self.last_row());
        let start = self.rope.line_to_char(row);
        let line = self.rope.line(row);
        let end = start + line.len_chars() - line_break_len(line);
        start..end
    }

    /// Length of `row` in codepoints.
    pub fn row_len(&self, row: usize) -> usize {
        self.row_range(row).len()
    }

    /// Text of `row` without its line break.
    pub fn row_text(&self, row: usize) -> String {
        self.rope.slice(self.row_range(row)).to_string()
    }

    /// Codepoints of `row` without its line break.
    pub fn row_chars(&self, row: usize) -> Vec<char> {
        self.rope.slice(self.row_range(row)).chars().collect()
    }

    /// Text of every row, without line breaks.
    pub fn rows(&self) -> Vec<String> {
        (0..self.row_count()).map(|row| self.row_text(row)).collect()
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Clamp a position onto the buffer.
    ///
    /// A row past the last row clamps to the end of the buffer; a column past
    /// the end of its row clamps to the row end.
    pub fn clamp(&self, pos: CursorPosition) -> CursorPosition {
        if pos.row > self.last_row() {
            return self.end_position();
        }
        CursorPosition::new(pos.row, pos.column.min(self.row_len(pos.row)))
    }

    /// Codepoint index of a position, after clamping.
    pub fn index_of(&self, pos: CursorPosition) -> usize {
        let pos = self.clamp(pos);
        self.rope.line_to_char(pos.row) + pos.column
    }

    /// Position of a codepoint index, after clamping.
    ///
    /// An index inside a CRLF pair resolves to the end of its row.
    pub fn position_of(&self, index: usize) -> CursorPosition {
        let index = index.min(self.len_chars());
        let row = self.rope.char_to_line(index);
        let start = self.rope.line_to_char(row);
        CursorPosition::new(row, (index - start).min(self.row_len(row)))
    }

    /// Position one past the last codepoint.
    pub fn end_position(&self) -> CursorPosition {
        self.position_of(self.len_chars())
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert `text` at a codepoint index. Returns the number of codepoints inserted.
    pub fn insert(&mut self, index: usize, text: &str) -> usize {
        let index = index.min(self.len_chars());
        self.rope.insert(index, text);
        text.chars().count()
    }

    /// Remove a codepoint range. Out-of-range bounds are clamped.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Text of a codepoint range. Out-of-range bounds are clamped.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }

    // =========================================================================
    // Grapheme and word navigation within a row
    // =========================================================================

    /// Column of the grapheme boundary after `column` on `row`.
    pub fn next_grapheme_column(&self, row: usize, column: usize) -> usize {
        let text = self.row_text(row);
        grapheme_columns(&text)
            .into_iter()
            .find(|&c| c > column)
            .unwrap_or_else(|| text.chars().count())
    }

    /// Column of the grapheme boundary before `column` on `row`.
    pub fn prev_grapheme_column(&self, row: usize, column: usize) -> usize {
        let text = self.row_text(row);
        grapheme_columns(&text)
            .into_iter()
            .rev()
            .find(|&c| c < column)
            .unwrap_or(0)
    }

    /// Column of the end of the next word after `column` on `row`.
    pub fn next_word_column(&self, row: usize, column: usize) -> usize {
        let text = self.row_text(row);
        word_spans(&text)
            .into_iter()
            .map(|span| span.end)
            .find(|&end| end > column)
            .unwrap_or_else(|| text.chars().count())
    }

    /// Column of the start of the word before `column` on `row`.
    pub fn prev_word_column(&self, row: usize, column: usize) -> usize {
        let text = self.row_text(row);
        word_spans(&text)
            .into_iter()
            .rev()
            .map(|span| span.start)
            .find(|&start| start < column)
            .unwrap_or(0)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

/// Grapheme cluster boundaries of `text`, in codepoint columns, including 0 and the end.
fn grapheme_columns(text: &str) -> Vec<usize> {
    let mut columns = vec![0];
    let mut column = 0;
    for cluster in text.graphemes(true) {
        column += cluster.chars().count();
        columns.push(column);
    }
    columns
}

/// Codepoint spans of the words in `text`, per Unicode word boundaries.
fn word_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut column = 0;
    for segment in text.split_word_bounds() {
        let len = segment.chars().count();
        if segment.chars().any(char::is_alphanumeric) {
            spans.push(column..column + len);
        }
        column += len;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, column: usize) -> CursorPosition {
        CursorPosition::new(row, column)
    }

    #[test]
    fn test_rows_exclude_line_breaks() {
        let buffer = TextBuffer::from("Testing\nTe\r\nst\u{2028}x");
        assert_eq!(buffer.row_count(), 4);
        assert_eq!(buffer.rows(), vec!["Testing", "Te", "st", "x"]);
        assert_eq!(buffer.row_range(1), 8..10);
    }

    #[test]
    fn test_trailing_break_adds_empty_row() {
        let buffer = TextBuffer::from("A\nB\n");
        assert_eq!(buffer.row_count(), 3);
        assert_eq!(buffer.row_len(2), 0);
        assert_eq!(buffer.end_position(), pos(2, 0));
    }

    #[test]
    fn test_empty_buffer_has_one_row() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.row_count(), 1);
        assert_eq!(buffer.row_text(0), "");
        assert_eq!(buffer.clamp(pos(4, 9)), pos(0, 0));
    }

    #[test]
    fn test_index_position_conversion() {
        let buffer = TextBuffer::from("Testing\nTesting\nTesting");
        assert_eq!(buffer.index_of(pos(1, 2)), 10);
        assert_eq!(buffer.position_of(10), pos(1, 2));
        assert_eq!(buffer.position_of(7), pos(0, 7));
        assert_eq!(buffer.position_of(8), pos(1, 0));
        assert_eq!(buffer.index_of(pos(0, 99)), 7);
        assert_eq!(buffer.position_of(999), pos(2, 7));
    }

    #[test]
    fn test_clamp_past_last_row_goes_to_end() {
        let buffer = TextBuffer::from("ab\ncd");
        assert_eq!(buffer.clamp(pos(9, 0)), pos(1, 2));
        assert_eq!(buffer.clamp(pos(9, 0)), buffer.end_position());
        assert_eq!(buffer.index_of(pos(9, 0)), 5);
        assert_eq!(buffer.clamp(pos(1, 9)), pos(1, 2));
        assert_eq!(buffer.clamp(pos(0, 1)), pos(0, 1));
    }

    #[test]
    fn test_index_inside_crlf_clamps_to_row_end() {
        let buffer = TextBuffer::from("ab\r\ncd");
        assert_eq!(buffer.position_of(3), pos(0, 2));
        assert_eq!(buffer.position_of(4), pos(1, 0));
    }

    #[test]
    fn test_codepoint_indexing() {
        let buffer = TextBuffer::from("日本語\nfish");
        assert_eq!(buffer.row_len(0), 3);
        assert_eq!(buffer.index_of(pos(1, 1)), 5);
        assert_eq!(buffer.slice(1..3), "本語");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buffer = TextBuffer::from("Testing");
        assert_eq!(buffer.insert(4, "日\n"), 2);
        assert_eq!(buffer.text(), "Test日\ning");
        buffer.remove(4..6);
        assert_eq!(buffer.text(), "Testing");
        buffer.remove(5..100);
        assert_eq!(buffer.text(), "Testi");
        buffer.remove(3..1);
        assert_eq!(buffer.text(), "Testi");
    }

    #[test]
    fn test_grapheme_columns() {
        // "e" + combining acute is one cluster of two codepoints.
        let buffer = TextBuffer::from("ae\u{301}b");
        assert_eq!(buffer.next_grapheme_column(0, 1), 3);
        assert_eq!(buffer.prev_grapheme_column(0, 3), 1);
        assert_eq!(buffer.next_grapheme_column(0, 4), 4);
        assert_eq!(buffer.prev_grapheme_column(0, 0), 0);
    }

    #[test]
    fn test_word_columns() {
        let buffer = TextBuffer::from("The quick  brown");
        assert_eq!(buffer.next_word_column(0, 0), 3);
        assert_eq!(buffer.next_word_column(0, 3), 9);
        assert_eq!(buffer.prev_word_column(0, 11), 4);
        assert_eq!(buffer.prev_word_column(0, 16), 11);
        assert_eq!(buffer.prev_word_column(0, 2), 0);
        assert_eq!(buffer.next_word_column(0, 16), 16);
    }
}
