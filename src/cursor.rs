use crate::buffer::Buffer;
use crate::viewport::Viewport;

/// Cursor in document coordinates. `row` may equal the buffer length (the
/// virtual line past the end); `col` never exceeds the current row length.
/// `rx` is the derived render column, refreshed by `sync_rx` before use.
pub struct Cursor {
    row: usize,
    col: usize,
    rx: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            rx: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn rx(&self) -> usize {
        self.rx
    }

    /// Recomputes the render column from the current row prefix.
    pub fn sync_rx(&mut self, buffer: &Buffer) {
        self.rx = buffer
            .row(self.row)
            .map(|row| row.cx_to_rx(self.col))
            .unwrap_or(0);
    }

    pub fn move_left(&mut self, buffer: &Buffer) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // Wrap to the end of the previous line
            self.row -= 1;
            self.col = buffer.row_len(self.row);
        }
    }

    pub fn move_right(&mut self, buffer: &Buffer) {
        if self.col < buffer.row_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < buffer.len() {
            // Wrap to the start of the next line; at the end of the last
            // row this is a no-op
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self, buffer: &Buffer) {
        if self.row > 0 {
            self.row -= 1;
        }
        self.clamp_col(buffer);
    }

    pub fn move_down(&mut self, buffer: &Buffer) {
        if self.row < buffer.len() {
            self.row += 1;
        }
        self.clamp_col(buffer);
    }

    /// Jumps to the top of the viewport, then steps up one screenful so the
    /// single-step wrap rules still apply at the buffer edge.
    pub fn page_up(&mut self, buffer: &Buffer, viewport: &Viewport) {
        self.row = viewport.row_offset();
        for _ in 0..viewport.text_rows() {
            self.move_up(buffer);
        }
    }

    pub fn page_down(&mut self, buffer: &Buffer, viewport: &Viewport) {
        let bottom = viewport.row_offset() + viewport.text_rows().saturating_sub(1);
        self.row = bottom.min(buffer.len());
        for _ in 0..viewport.text_rows() {
            self.move_down(buffer);
        }
    }

    pub fn line_home(&mut self) {
        self.col = 0;
    }

    pub fn line_end(&mut self, buffer: &Buffer) {
        self.col = buffer.row_len(self.row);
    }

    /// Snap-back: a vertical move onto a shorter line must not leave the
    /// column past its end.
    fn clamp_col(&mut self, buffer: &Buffer) {
        let len = buffer.row_len(self.row);
        if self.col > len {
            self.col = len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(lines: &[&str]) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, line) in lines.iter().enumerate() {
            buffer.insert_row(i, line.to_string());
        }
        buffer
    }

    #[test]
    fn test_right_walks_line_then_wraps() {
        let buffer = buffer_of(&["abc", "\tx", "de"]);
        let mut cursor = Cursor::new();

        for _ in 0..3 {
            cursor.move_right(&buffer);
        }
        assert_eq!((cursor.row(), cursor.col()), (0, 3));

        cursor.move_right(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (1, 0));
    }

    #[test]
    fn test_right_past_last_row_is_noop() {
        let buffer = buffer_of(&["ab"]);
        let mut cursor = Cursor::new();

        cursor.move_right(&buffer);
        cursor.move_right(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (0, 2));

        // End of the last row: no wrap
        cursor.move_right(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (0, 2));

        // The virtual line (reached by moving down) does not wrap either
        cursor.move_down(&buffer);
        cursor.move_right(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (1, 0));
    }

    #[test]
    fn test_left_wraps_to_previous_line_end() {
        let buffer = buffer_of(&["abc", "de"]);
        let mut cursor = Cursor::new();
        cursor.move_down(&buffer);

        cursor.move_left(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (0, 3));
    }

    #[test]
    fn test_left_at_origin_is_noop() {
        let buffer = buffer_of(&["abc"]);
        let mut cursor = Cursor::new();

        cursor.move_left(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (0, 0));
    }

    #[test]
    fn test_vertical_move_snaps_to_shorter_line() {
        let buffer = buffer_of(&["abcdef", "ab", "xyzw"]);
        let mut cursor = Cursor::new();
        cursor.line_end(&buffer);
        assert_eq!(cursor.col(), 6);

        cursor.move_down(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (1, 2));

        // Moving on does not regain the lost columns
        cursor.move_down(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (2, 2));
    }

    #[test]
    fn test_up_at_top_is_noop() {
        let buffer = buffer_of(&["abc"]);
        let mut cursor = Cursor::new();

        cursor.move_up(&buffer);
        assert_eq!((cursor.row(), cursor.col()), (0, 0));
    }

    #[test]
    fn test_down_stops_at_virtual_line() {
        let buffer = buffer_of(&["abc", "de"]);
        let mut cursor = Cursor::new();

        for _ in 0..5 {
            cursor.move_down(&buffer);
        }
        assert_eq!((cursor.row(), cursor.col()), (2, 0));
    }

    #[test]
    fn test_home_and_end() {
        let buffer = buffer_of(&["hello"]);
        let mut cursor = Cursor::new();

        cursor.line_end(&buffer);
        assert_eq!(cursor.col(), 5);
        cursor.line_home();
        assert_eq!(cursor.col(), 0);
    }

    #[test]
    fn test_sync_rx_expands_tab_prefix() {
        let buffer = buffer_of(&["\tx"]);
        let mut cursor = Cursor::new();
        cursor.move_right(&buffer);

        cursor.sync_rx(&buffer);
        assert_eq!(cursor.rx(), 8);
    }

    #[test]
    fn test_sync_rx_on_virtual_line_is_zero() {
        let buffer = buffer_of(&["abc"]);
        let mut cursor = Cursor::new();
        cursor.line_end(&buffer);
        cursor.move_down(&buffer);

        cursor.sync_rx(&buffer);
        assert_eq!(cursor.rx(), 0);
    }

    #[test]
    fn test_page_down_then_page_up() {
        let lines: Vec<String> = (0..100).map(|i| format!("l{i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let buffer = buffer_of(&refs);
        let mut viewport = Viewport::new(12, 80);
        let mut cursor = Cursor::new();

        // 10 text rows: first page lands on row 9 + 10 steps = 19... the
        // jump goes to the viewport bottom first, then steps a screenful
        cursor.page_down(&buffer, &viewport);
        assert_eq!(cursor.row(), 19);

        viewport.scroll(&mut cursor, &buffer);
        cursor.page_up(&buffer, &viewport);
        assert_eq!(cursor.row(), 0);
    }

    #[test]
    fn test_page_down_clamps_at_buffer_end() {
        let buffer = buffer_of(&["a", "b", "c"]);
        let viewport = Viewport::new(12, 80);
        let mut cursor = Cursor::new();

        cursor.page_down(&buffer, &viewport);
        assert_eq!(cursor.row(), buffer.len());
    }
}
