use crate::UI_HEIGHT;
use crate::buffer::Buffer;
use crate::cursor::Cursor;

/// The visible window into the document: screen geometry (fixed at startup)
/// plus the top-left offset in document coordinates. `row_offset` counts
/// rows, `col_offset` counts rendered columns.
pub struct Viewport {
    rows: usize,
    cols: usize,
    row_offset: usize,
    col_offset: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_offset: 0,
            col_offset: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Rows available for document text, below the status and message bars.
    pub fn text_rows(&self) -> usize {
        self.rows.saturating_sub(UI_HEIGHT)
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Re-derives the offsets so the cursor's render position is inside the
    /// window. Runs every frame, before composition; also refreshes the
    /// cursor's render column, which depends on the row prefix.
    pub fn scroll(&mut self, cursor: &mut Cursor, buffer: &Buffer) {
        cursor.sync_rx(buffer);

        if cursor.row() < self.row_offset {
            self.row_offset = cursor.row();
        }
        if cursor.row() >= self.row_offset + self.text_rows() {
            self.row_offset = cursor.row() + 1 - self.text_rows();
        }
        if cursor.rx() < self.col_offset {
            self.col_offset = cursor.rx();
        }
        if cursor.rx() >= self.col_offset + self.cols {
            self.col_offset = cursor.rx() + 1 - self.cols;
        }
    }
}
