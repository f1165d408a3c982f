//! Binary reader for font data
//!
//! All multi-byte values are big-endian. Every read checks
//! `offset + width <= len` before touching the slice.

use crate::error::ReadError;

/// Binary reader with bounds checking
#[derive(Debug, Clone)]
pub struct FontReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FontReader<'a> {
    /// Create a new reader
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a reader starting at `pos`
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Get current position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Set position
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Length of the underlying data
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying data is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Remaining bytes
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn check(&self, offset: usize, width: usize) -> Result<usize, ReadError> {
        match offset.checked_add(width) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(ReadError::TruncatedTable {
                offset,
                width,
                len: self.data.len(),
            }),
        }
    }

    /// Borrow `n` bytes at `offset` without moving
    pub fn bytes_at(&self, offset: usize, n: usize) -> Result<&'a [u8], ReadError> {
        let end = self.check(offset, n)?;
        Ok(&self.data[offset..end])
    }

    fn array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N], ReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes_at(offset, N)?);
        Ok(out)
    }

    /// Read u8 at `offset`
    pub fn read_u8_at(&self, offset: usize) -> Result<u8, ReadError> {
        Ok(self.array_at::<1>(offset)?[0])
    }

    /// Read big-endian u16 at `offset`
    pub fn read_u16_at(&self, offset: usize) -> Result<u16, ReadError> {
        Ok(u16::from_be_bytes(self.array_at(offset)?))
    }

    /// Read big-endian i16 at `offset`
    pub fn read_i16_at(&self, offset: usize) -> Result<i16, ReadError> {
        Ok(i16::from_be_bytes(self.array_at(offset)?))
    }

    /// Read big-endian u32 at `offset`
    pub fn read_u32_at(&self, offset: usize) -> Result<u32, ReadError> {
        Ok(u32::from_be_bytes(self.array_at(offset)?))
    }

    /// Skip bytes
    pub fn skip(&mut self, n: usize) -> Result<(), ReadError> {
        self.pos = self.check(self.pos, n)?;
        Ok(())
    }

    /// Read u8
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        let v = self.read_u8_at(self.pos)?;
        self.pos += 1;
        Ok(v)
    }

    /// Read big-endian u16
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let v = self.read_u16_at(self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    /// Read big-endian i16
    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        let v = self.read_i16_at(self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    /// Read big-endian u32
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        let v = self.read_u32_at(self.pos)?;
        self.pos += 4;
        Ok(v)
    }

    /// Read 4-byte tag
    pub fn read_tag(&mut self) -> Result<[u8; 4], ReadError> {
        let tag = self.array_at(self.pos)?;
        self.pos += 4;
        Ok(tag)
    }

    /// Read bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let slice = self.bytes_at(self.pos, n)?;
        self.pos += n;
        Ok(slice)
    }
}
