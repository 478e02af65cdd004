use std::fmt::{self, Write as _};
use std::time::{Duration, Instant};

use unicode_width::UnicodeWidthChar;

use crate::VERSION;
use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::viewport::Viewport;

/// A status message disappears from the message bar after this long.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            set_at: Instant::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_fresh(&self) -> bool {
        self.set_at.elapsed() < MESSAGE_TIMEOUT
    }

    #[cfg(test)]
    fn aged(text: &str, age: Duration) -> Self {
        Self {
            text: text.to_string(),
            set_at: Instant::now() - age,
        }
    }
}

/// Append buffer for one frame. Everything is accumulated here and handed
/// to the terminal as a single write, so the screen never shows a
/// half-drawn update.
pub struct Frame {
    buf: String,
}

impl Frame {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }

    pub fn push_seq(&mut self, seq: impl fmt::Display) {
        // Writing into a String cannot fail
        let _ = write!(self.buf, "{seq}");
    }

    pub fn take(self) -> String {
        self.buf
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Screen;

impl Screen {
    /// Composes one full screen update from the current editor state.
    /// Pure with respect to the terminal: the caller writes the result.
    pub fn compose(
        buffer: &Buffer,
        cursor: &Cursor,
        viewport: &Viewport,
        filename: Option<&str>,
        message: Option<&StatusMessage>,
    ) -> String {
        let mut frame = Frame::new();

        frame.push_seq(termion::cursor::Hide);
        frame.push_seq(termion::cursor::Goto(1, 1));

        Self::draw_rows(&mut frame, buffer, viewport);
        Self::draw_status_bar(
            &mut frame,
            filename,
            buffer.len(),
            cursor.row(),
            viewport.cols(),
        );
        frame.push("\r\n");
        Self::draw_message_bar(&mut frame, message, viewport.cols());

        frame.push_seq(termion::cursor::Goto(
            (cursor.rx() - viewport.col_offset() + 1) as u16,
            (cursor.row() - viewport.row_offset() + 1) as u16,
        ));
        frame.push_seq(termion::cursor::Show);

        frame.take()
    }

    pub fn draw_rows(frame: &mut Frame, buffer: &Buffer, viewport: &Viewport) {
        for y in 0..viewport.text_rows() {
            let file_row = y + viewport.row_offset();
            if let Some(row) = buffer.row(file_row) {
                frame.push(clip_columns(
                    row.render(),
                    viewport.col_offset(),
                    viewport.cols(),
                ));
            } else if buffer.is_empty() && y == viewport.rows() / 2 {
                Self::draw_welcome(frame, viewport.cols());
            } else {
                frame.push_char('~');
            }
            frame.push_seq(termion::clear::UntilNewline);
            frame.push("\r\n");
        }
    }

    fn draw_welcome(frame: &mut Frame, cols: usize) {
        let welcome = format!("rilo editor -- version {VERSION}");
        let welcome = clip_columns(&welcome, 0, cols);
        let mut padding = cols.saturating_sub(welcome.chars().count()) / 2;
        if padding > 0 {
            frame.push_char('~');
            padding -= 1;
        }
        for _ in 0..padding {
            frame.push_char(' ');
        }
        frame.push(welcome);
    }

    pub fn draw_status_bar(
        frame: &mut Frame,
        filename: Option<&str>,
        buffer_len: usize,
        cursor_row: usize,
        cols: usize,
    ) {
        let name = filename.unwrap_or("[No Name]");
        let status = format!("{name:.20} - {buffer_len} lines");
        let status = clip_columns(&status, 0, cols);
        let position = format!("{}::{}", cursor_row + 1, buffer_len);

        frame.push_seq(termion::style::Invert);
        frame.push(status);

        // Pad with spaces; the position indicator goes in only if it lands
        // exactly flush with the right edge
        let mut len = status.chars().count();
        while len < cols {
            if cols - len == position.len() {
                frame.push(&position);
                break;
            }
            frame.push_char(' ');
            len += 1;
        }
        frame.push_seq(termion::style::Reset);
    }

    pub fn draw_message_bar(frame: &mut Frame, message: Option<&StatusMessage>, cols: usize) {
        frame.push_seq(termion::clear::UntilNewline);
        if let Some(message) = message
            && message.is_fresh()
        {
            frame.push(clip_columns(message.text(), 0, cols));
        }
    }
}

/// Slices `text` to the rendered-column window `[offset, offset + width)`,
/// clamped to the text's actual width. Rows shorter than the offset come
/// back empty.
fn clip_columns(text: &str, offset: usize, width: usize) -> &str {
    let mut col = 0;
    let mut start = None;
    let mut end = text.len();
    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if start.is_none() && col >= offset {
            start = Some(i);
        }
        if col + w > offset + width {
            end = i;
            break;
        }
        col += w;
    }
    match start {
        Some(s) if s <= end => &text[s..end],
        _ => "",
    }
}
