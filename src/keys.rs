use std::io;

/// A logical key decoded from the raw byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

/// Timed byte input. `Ok(None)` means no byte arrived within the read
/// timeout. Implemented by `Terminal` and by test fixtures.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Decoder state after an ESC byte has been consumed.
enum SeqState {
    /// Right after ESC
    Start,
    /// ESC [
    Csi,
    /// ESC [ digit, waiting for the '~' terminator
    CsiDigit(u8),
    /// ESC O
    Ss3,
}

pub struct KeyDecoder;

impl KeyDecoder {
    /// Blocks until a whole key is available, retrying the timed read for
    /// the first byte. Escape sequences that stall or fail to match decode
    /// to a bare `Esc`; their consumed bytes are discarded, not re-queued.
    pub fn next_key(input: &mut impl ByteSource) -> io::Result<Key> {
        let byte = loop {
            if let Some(byte) = input.read_byte()? {
                break byte;
            }
        };

        match byte {
            0x1b => Self::decode_escape(input),
            0x01..=0x1a => Ok(Key::Ctrl((byte | 0x60) as char)),
            _ => Ok(Key::Char(byte as char)),
        }
    }

    fn decode_escape(input: &mut impl ByteSource) -> io::Result<Key> {
        let mut state = SeqState::Start;
        loop {
            let Some(byte) = input.read_byte()? else {
                // Sequence went quiet: treat what we saw as a lone ESC
                return Ok(Key::Esc);
            };
            state = match (state, byte) {
                (SeqState::Start, b'[') => SeqState::Csi,
                (SeqState::Start, b'O') => SeqState::Ss3,
                (SeqState::Csi, b'A') => return Ok(Key::Up),
                (SeqState::Csi, b'B') => return Ok(Key::Down),
                (SeqState::Csi, b'C') => return Ok(Key::Right),
                (SeqState::Csi, b'D') => return Ok(Key::Left),
                (SeqState::Csi, b'F') => return Ok(Key::End),
                (SeqState::Csi, b'H') => return Ok(Key::Home),
                (SeqState::Csi, digit @ b'0'..=b'9') => SeqState::CsiDigit(digit),
                (SeqState::CsiDigit(b'3'), b'~') => return Ok(Key::Delete),
                (SeqState::CsiDigit(b'5'), b'~') => return Ok(Key::PageUp),
                (SeqState::CsiDigit(b'6'), b'~') => return Ok(Key::PageDown),
                (SeqState::Ss3, b'F') => return Ok(Key::End),
                (SeqState::Ss3, b'H') => return Ok(Key::Home),
                _ => return Ok(Key::Esc),
            };
        }
    }
}
