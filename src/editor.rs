use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::file_io::FileIO;
use crate::keys::{Key, KeyDecoder};
use crate::logger;
use crate::screen::{Screen, StatusMessage};
use crate::terminal::Terminal;
use crate::viewport::Viewport;

/// Top-level session: owns the terminal, the document, and all view state,
/// and runs the render / read-key loop.
pub struct Editor {
    terminal: Terminal,
    buffer: Buffer,
    cursor: Cursor,
    viewport: Viewport,
    filename: Option<String>,
    message: Option<StatusMessage>,
}

impl Editor {
    pub fn new() -> Result<Self> {
        let mut terminal = Terminal::new()?;
        let (rows, cols) = terminal.size()?;
        Ok(Self {
            terminal,
            buffer: Buffer::new(),
            cursor: Cursor::new(),
            viewport: Viewport::new(rows as usize, cols as usize),
            filename: None,
            message: Some(StatusMessage::new("HELP: Ctrl-Q = quit")),
        })
    }

    pub fn open(&mut self, path: &str) -> Result<()> {
        self.buffer = FileIO::open(path)?;
        self.filename = Some(path.to_string());
        logger::debug(&format!("opened {path} ({} rows)", self.buffer.len()));
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.refresh()?;
            let key = KeyDecoder::next_key(&mut self.terminal)?;
            if !self.process_key(key)? {
                logger::debug("quit");
                return Ok(());
            }
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.viewport.scroll(&mut self.cursor, &self.buffer);
        let frame = Screen::compose(
            &self.buffer,
            &self.cursor,
            &self.viewport,
            self.filename.as_deref(),
            self.message.as_ref(),
        );
        self.terminal.write_all(frame.as_bytes())?;
        self.terminal.flush()?;
        Ok(())
    }

    /// Applies one key. Returns false when the session should end.
    fn process_key(&mut self, key: Key) -> Result<bool> {
        match key {
            Key::Ctrl('q') => {
                let reset = format!("{}{}", termion::clear::All, termion::cursor::Goto(1, 1));
                self.terminal.write_all(reset.as_bytes())?;
                self.terminal.flush()?;
                return Ok(false);
            }
            Key::Up => self.cursor.move_up(&self.buffer),
            Key::Down => self.cursor.move_down(&self.buffer),
            Key::Left => self.cursor.move_left(&self.buffer),
            Key::Right => self.cursor.move_right(&self.buffer),
            Key::Home => self.cursor.line_home(),
            Key::End => self.cursor.line_end(&self.buffer),
            Key::PageUp => self.cursor.page_up(&self.buffer, &self.viewport),
            Key::PageDown => self.cursor.page_down(&self.buffer, &self.viewport),
            // No editing operations in this core; everything else is inert
            Key::Delete | Key::Esc | Key::Char(_) | Key::Ctrl(_) => {}
        }
        Ok(true)
    }
}
