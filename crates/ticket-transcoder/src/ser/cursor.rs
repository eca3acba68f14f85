// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors over encoded record bytes.
//!

use super::varint::{decode_varint, encode_varint, zigzag_decode, zigzag_encode, VarintError};
use super::{SerError, SerResult};

/// Mutable cursor for writing (bounds-checked, never grows the buffer)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn write_u8(&mut self, value: u8) -> SerResult<()> {
        self.write_bytes(&[value])
    }

    pub fn write_varint(&mut self, value: u64) -> SerResult<()> {
        let (bytes, len) = encode_varint(value);
        self.write_bytes(&bytes[..len])
    }

    pub fn write_varint_signed(&mut self, value: i64) -> SerResult<()> {
        self.write_varint(zigzag_encode(value))
    }

    pub fn write_f64_le(&mut self, value: f64) -> SerResult<()> {
        self.write_bytes(&value.to_bits().to_le_bytes())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> SerResult<()> {
        if data.len() > self.remaining() {
            return Err(SerError::Exhausted {
                offset: self.offset,
                capacity: self.buffer.len(),
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    /// Length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) -> SerResult<()> {
        self.write_varint(value.len() as u64)?;
        self.write_bytes(value.as_bytes())
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    pub fn read_u8(&mut self) -> SerResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_varint(&mut self) -> SerResult<u64> {
        match decode_varint(&self.buffer[self.offset.min(self.buffer.len())..]) {
            Ok((value, consumed)) => {
                self.offset += consumed;
                Ok(value)
            }
            Err(VarintError::UnexpectedEof) => Err(SerError::UnexpectedEof {
                offset: self.buffer.len(),
                needed: 1,
            }),
            Err(VarintError::Overflow) => Err(SerError::VarintOverflow {
                offset: self.offset,
            }),
        }
    }

    pub fn read_varint_u32(&mut self) -> SerResult<u32> {
        let offset = self.offset;
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| SerError::VarintOverflow { offset })
    }

    pub fn read_varint_signed(&mut self) -> SerResult<i64> {
        Ok(zigzag_decode(self.read_varint()?))
    }

    pub fn read_f64_le(&mut self) -> SerResult<f64> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.read_bytes(8)?);
        Ok(f64::from_bits(u64::from_le_bytes(bytes)))
    }

    pub fn read_bytes(&mut self, len: usize) -> SerResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(SerError::UnexpectedEof {
                offset: self.offset,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Length-prefixed UTF-8 string written by [`CursorMut::write_str`].
    pub fn read_str(&mut self) -> SerResult<&'a str> {
        let len = self.read_len()?;
        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes).map_err(|_| SerError::InvalidUtf8 { offset: start })
    }

    /// Read a length or element count.
    ///
    /// Every counted item occupies at least one byte, so a count larger than
    /// the remaining input can only come from a cut-off record.
    pub fn read_len(&mut self) -> SerResult<usize> {
        let offset = self.offset;
        let value = self.read_varint()?;
        let len = usize::try_from(value).map_err(|_| SerError::VarintOverflow { offset })?;
        if len > self.remaining() {
            return Err(SerError::UnexpectedEof {
                offset: self.offset,
                needed: len - self.remaining(),
            });
        }
        Ok(len)
    }
}
