use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::RdiffError;

/// Sequential and positioned access over a single file handle.
///
/// Each `ByteStream` exclusively owns its underlying `File` for its
/// lifetime; the handle is released on drop regardless of how the stream
/// goes out of scope, including on an error path.
pub struct ByteStream {
    file: File,
}

impl ByteStream {
    /// Opens `path` for reading.
    pub fn open_read(path: &Path) -> Result<Self, RdiffError> {
        let file = File::open(path).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "cannot open file for reading");
            err
        })?;
        Ok(Self { file })
    }

    /// Creates (truncating) `path` for writing.
    pub fn create_write(path: &Path) -> Result<Self, RdiffError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|err| {
                tracing::warn!(path = %path.display(), error = %err, "cannot open file for writing");
                err
            })?;
        Ok(Self { file })
    }

    /// Reads the next `len` bytes sequentially from the current file
    /// position. Returns fewer than `len` bytes (possibly zero) at EOF;
    /// this never errors on a short read.
    pub fn read_chunk(&mut self, len: usize) -> Result<Vec<u8>, RdiffError> {
        if len == 0 {
            return Ok(Vec::new());
        }

        let mut buf = vec![0u8; len];
        let mut total = 0usize;
        while total < len {
            let n = self.file.read(&mut buf[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        buf.truncate(total);
        Ok(buf)
    }

    /// Reads `len` bytes starting at the given absolute `position`,
    /// truncated at EOF like [`Self::read_chunk`].
    pub fn read_chunk_at(&mut self, len: usize, position: u64) -> Result<Vec<u8>, RdiffError> {
        self.file.seek(SeekFrom::Start(position))?;
        self.read_chunk(len)
    }

    /// Reads a single byte sequentially, or `None` at EOF.
    pub fn read_byte(&mut self) -> Result<Option<u8>, RdiffError> {
        let mut b = [0u8; 1];
        match self.file.read(&mut b)? {
            0 => Ok(None),
            _ => Ok(Some(b[0])),
        }
    }

    /// Appends `data` at the current file position.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), RdiffError> {
        self.file.write_all(data)?;
        Ok(())
    }
}
