//! Shared snapshot buffers
//!
//! Several plugins append their records to the same buffer on save, and on
//! load each one inspects the bytes at the current read position. The
//! writer only appends; the reader keeps an explicit offset and checks
//! bounds before every read.

use crate::error::SnapshotError;

/// Append-only output buffer
#[derive(Debug, Clone, Default)]
pub struct SnapshotWriter {
    buffer: Vec<u8>,
}

impl SnapshotWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue appending after existing contents
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Append a contiguous block of bytes at the write position
    pub fn write_data(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Current write position
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the underlying buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

/// Cursor over a shared input buffer
#[derive(Debug, Clone)]
pub struct SnapshotReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> SnapshotReader<'a> {
    /// Start reading at the beginning of `buffer`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread bytes, without consuming them
    pub fn current(&self) -> &'a [u8] {
        &self.buffer[self.position..]
    }

    /// Look at the next `len` bytes without consuming them
    pub fn peek(&self, len: usize) -> Option<&'a [u8]> {
        self.current().get(..len)
    }

    /// Consume the next `len` bytes
    ///
    /// On error the position is left unchanged.
    pub fn read(&mut self, len: usize) -> Result<&'a [u8], SnapshotError> {
        let data = self.peek(len).ok_or(SnapshotError::Truncated {
            needed: len,
            available: self.remaining(),
        })?;
        self.position += len;
        Ok(data)
    }
}
