use std::io::{self, Read, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use termion::AsyncReader;
use termion::raw::{IntoRawMode, RawTerminal};

use crate::error::{Error, Result};
use crate::keys::ByteSource;

/// How long a single byte read waits before giving up.
const READ_TIMEOUT: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Raw-mode terminal session. `RawTerminal` captures the previous termios
/// settings and restores them when dropped, so cooked mode comes back on
/// every exit path. Our own `Drop` clears the screen first.
pub struct Terminal {
    stdout: RawTerminal<Stdout>,
    input: AsyncReader,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let stdout = io::stdout().into_raw_mode()?;
        let input = termion::async_stdin();
        Ok(Self { stdout, input })
    }

    /// Reads one byte, waiting up to `READ_TIMEOUT` for it to arrive.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        let deadline = Instant::now() + READ_TIMEOUT;
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => {}
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Writes the whole buffer or fails. A partial frame on screen is worse
    /// than an error, so there is no short-write path.
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stdout.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    /// Terminal size as (rows, cols). Tries the size ioctl first, then
    /// falls back to parking the cursor at the bottom-right corner and
    /// asking the terminal where it ended up.
    pub fn size(&mut self) -> Result<(u16, u16)> {
        match termion::terminal_size() {
            Ok((cols, rows)) if cols > 0 => Ok((rows, cols)),
            _ => {
                self.write_all(b"\x1b[999C\x1b[999B")?;
                self.cursor_position()
            }
        }
    }

    /// Issues a cursor position report query and parses the
    /// `ESC [ rows ; cols R` reply.
    fn cursor_position(&mut self) -> Result<(u16, u16)> {
        self.write_all(b"\x1b[6n")?;
        self.flush()?;

        let mut reply = Vec::new();
        while reply.len() < 32 {
            match self.read_byte()? {
                Some(b'R') | None => break,
                Some(byte) => reply.push(byte),
            }
        }
        parse_cursor_report(&reply).ok_or(Error::WindowSize)
    }
}

impl ByteSource for Terminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Terminal::read_byte(self)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Leave a clean screen behind; the raw-mode guard restores termios
        let _ = write!(
            self.stdout,
            "{}{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1),
            termion::cursor::Show
        );
        let _ = self.stdout.flush();
    }
}

/// Parses the body of a cursor position report, minus the trailing 'R'.
fn parse_cursor_report(reply: &[u8]) -> Option<(u16, u16)> {
    let text = std::str::from_utf8(reply).ok()?;
    let body = text.strip_prefix("\x1b[")?;
    let (rows, cols) = body.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cursor_report() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"\x1b[1;1"), Some((1, 1)));
    }

    #[test]
    fn test_parse_cursor_report_rejects_garbage() {
        assert_eq!(parse_cursor_report(b""), None);
        assert_eq!(parse_cursor_report(b"24;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24"), None);
        assert_eq!(parse_cursor_report(b"\x1b[a;b"), None);
    }
}
