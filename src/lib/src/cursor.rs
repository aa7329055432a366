//! Sequential little-endian access to a byte buffer.
//!
//! Every binary format in this crate is built from the same handful of
//! primitives: fixed-width integers, 16-byte opaque blobs (GUIDs and EFI
//! timestamps) and byte strings prefixed with a 64-bit length. `ByteCursor`
//! provides them over any buffer it owns. Reading is available for every
//! `AsRef<[u8]>` buffer, writing only for `Vec<u8>`.

use crate::error::*;
use crate::varstore::{Guid, Timestamp};

#[derive(Debug, Clone, Default)]
pub struct ByteCursor<B> {
    buf: B,
    pos: usize,
}

impl<B> ByteCursor<B> {
    pub fn new(buf: B) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read/write position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute position. Seeking beyond the end is allowed;
    /// the next read fails and the next write zero-fills the gap.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: AsRef<[u8]>> ByteCursor<B> {
    /// Number of bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.buf.as_ref().len().saturating_sub(self.pos)
    }

    /// Everything from the current position to the end, consuming it.
    pub fn rest(&mut self) -> &[u8] {
        let start = self.pos.min(self.buf.as_ref().len());
        self.pos = self.buf.as_ref().len().max(self.pos);
        &self.buf.as_ref()[start..]
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8], UVError> {
        if self.remaining() < len {
            return Err(UVError::Truncated {
                offset: self.pos,
                wanted: len as u64,
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf.as_ref()[start..self.pos])
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], UVError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, UVError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, UVError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, UVError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, UVError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a byte string prefixed with its length as a 64-bit integer.
    ///
    /// The length is checked against the remaining input before anything is
    /// allocated, so a corrupted prefix fails instead of exhausting memory.
    pub fn read_data(&mut self) -> Result<Vec<u8>, UVError> {
        let offset = self.pos;
        let len = self.read_u64()?;
        if len > self.remaining() as u64 {
            return Err(UVError::Truncated {
                offset,
                wanted: len,
            });
        }
        Ok(self.read_bytes(len as usize)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<String, UVError> {
        let data = self.read_data()?;
        Ok(std::str::from_utf8(&data)?.to_string())
    }

    pub fn read_guid(&mut self) -> Result<Guid, UVError> {
        Ok(Guid::from_bytes(self.read_array()?))
    }

    pub fn read_timestamp(&mut self) -> Result<Timestamp, UVError> {
        self.read_array()
    }

    /// Skip forward to the next multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        self.pos = self.pos.next_multiple_of(alignment);
    }
}

impl ByteCursor<Vec<u8>> {
    pub fn write_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        let bytes = bytes.as_ref();
        let end = self.pos + bytes.len();
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    pub fn write_u8(&mut self, v: u8) {
        self.write_bytes([v]);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.write_bytes(v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write_bytes(v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(v.to_le_bytes());
    }

    /// Write a byte string prefixed with its length as a 64-bit integer.
    pub fn write_data(&mut self, data: impl AsRef<[u8]>) {
        let data = data.as_ref();
        self.write_u64(data.len() as u64);
        self.write_bytes(data);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_data(s.as_bytes());
    }

    pub fn write_guid(&mut self, guid: &Guid) {
        self.write_bytes(guid.as_bytes());
    }

    pub fn write_timestamp(&mut self, timestamp: &Timestamp) {
        self.write_bytes(timestamp);
    }

    /// Zero-fill up to the next multiple of `alignment`.
    pub fn align_zeroed(&mut self, alignment: usize) {
        let target = self.pos.next_multiple_of(alignment);
        let pad = target - self.pos;
        self.write_bytes(vec![0u8; pad]);
    }
}
