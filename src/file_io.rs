use std::fs;
use std::path::Path;

use crate::buffer::Buffer;
use crate::error::{Error, Result};

pub struct FileIO;

impl FileIO {
    /// Loads a file into a fresh buffer, one row per line. Lines are split
    /// at `\n`; a trailing `\r` is stripped, so CRLF files load cleanly.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Buffer> {
        let content = fs::read_to_string(&path).map_err(|source| Error::Open {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        let mut buffer = Buffer::new();
        for (index, line) in content.lines().enumerate() {
            buffer.insert_row(index, line.to_string());
        }
        Ok(buffer)
    }
}
