use unicode_width::UnicodeWidthChar;

use crate::TAB_STOP;

#[derive(Debug)]
pub struct Row {
    chars: String,
    render: String,
}

impl Row {
    pub fn new(text: String) -> Self {
        let render = Self::expand_tabs(&text);
        Self {
            chars: text,
            render,
        }
    }

    /// Tab expansion: each tab becomes spaces up to the next multiple of
    /// TAB_STOP; every other character keeps its display width.
    fn expand_tabs(chars: &str) -> String {
        let mut render = String::with_capacity(chars.len());
        let mut col = 0;
        for ch in chars.chars() {
            if ch == '\t' {
                let stop = TAB_STOP - col % TAB_STOP;
                for _ in 0..stop {
                    render.push(' ');
                }
                col += stop;
            } else {
                render.push(ch);
                col += ch.width().unwrap_or(0);
            }
        }
        render
    }

    /// Maps a column in `chars` to the on-screen render column. Walks the
    /// row prefix, so it must be recomputed whenever the cursor moves.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for ch in self.chars.chars().take(cx) {
            if ch == '\t' {
                rx += TAB_STOP - rx % TAB_STOP;
            } else {
                rx += ch.width().unwrap_or(0);
            }
        }
        rx
    }

    pub fn chars(&self) -> &str {
        &self.chars
    }

    pub fn render(&self) -> &str {
        &self.render
    }

    pub fn len(&self) -> usize {
        self.chars.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[derive(Debug)]
pub struct Buffer {
    rows: Vec<Row>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn insert_row(&mut self, at: usize, text: String) {
        if at <= self.rows.len() {
            self.rows.insert(at, Row::new(text));
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Length in characters of the given row, 0 past the end of the buffer.
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map(Row::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_tabs_is_identity() {
        let row = Row::new("hello world".to_string());
        assert_eq!(row.render(), "hello world");
    }

    #[test]
    fn test_render_leading_tab() {
        // A tab at column 0 expands to a full stop of 8 spaces
        let row = Row::new("\tx".to_string());
        assert_eq!(row.render(), "        x");
        assert_eq!(row.render().chars().count(), 9);
    }

    #[test]
    fn test_render_mid_line_tab() {
        // After one character the tab only advances to the next stop
        let row = Row::new("a\tb".to_string());
        assert_eq!(row.render(), "a       b");
    }

    #[test]
    fn test_render_tab_at_stop_boundary() {
        let row = Row::new("12345678\tx".to_string());
        assert_eq!(row.render(), "12345678        x");
    }

    #[test]
    fn test_render_is_idempotent() {
        let row = Row::new("a\tb\tc".to_string());
        let again = Row::new(row.chars().to_string());
        assert_eq!(row.render(), again.render());
    }

    #[test]
    fn test_cx_to_rx_without_tabs_equals_cx() {
        let row = Row::new("plain text".to_string());
        for cx in 0..=row.len() {
            assert_eq!(row.cx_to_rx(cx), cx);
        }
    }

    #[test]
    fn test_cx_to_rx_with_tab() {
        let row = Row::new("\tx".to_string());
        assert_eq!(row.cx_to_rx(0), 0);
        assert_eq!(row.cx_to_rx(1), 8);
        assert_eq!(row.cx_to_rx(2), 9);
    }

    #[test]
    fn test_cx_to_rx_is_monotonic() {
        let row = Row::new("a\tbb\tc".to_string());
        let mut last = 0;
        for cx in 0..=row.len() {
            let rx = row.cx_to_rx(cx);
            assert!(rx >= last);
            last = rx;
        }
    }

    #[test]
    fn test_insert_row_keeps_order() {
        let mut buffer = Buffer::new();
        buffer.insert_row(0, "first".to_string());
        buffer.insert_row(1, "third".to_string());
        buffer.insert_row(1, "second".to_string());

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.row(0).unwrap().chars(), "first");
        assert_eq!(buffer.row(1).unwrap().chars(), "second");
        assert_eq!(buffer.row(2).unwrap().chars(), "third");
    }

    #[test]
    fn test_insert_row_out_of_range_is_ignored() {
        let mut buffer = Buffer::new();
        buffer.insert_row(5, "nope".to_string());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_row_len_past_end_is_zero() {
        let mut buffer = Buffer::new();
        buffer.insert_row(0, "abc".to_string());
        assert_eq!(buffer.row_len(0), 3);
        assert_eq!(buffer.row_len(1), 0);
    }
}
