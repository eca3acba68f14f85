// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ULEB128 variable-length integers and ZigZag signed mapping.
//!
//! Lengths, counts and type discriminators are small in practice, so every
//! integer on the wire goes through this encoding:
//!
//! - Each byte uses 7 bits for data, bit 7 indicates continuation
//! - Values 0-127 encode in 1 byte
//! - Maximum encoded length for u64 is 10 bytes
//!
//! Signed values are first mapped with ZigZag so that small negative numbers
//! stay short (`-1 -> 1`, `1 -> 2`, `-2 -> 3`, ...).

/// Maximum bytes needed to encode a u64 in ULEB128.
pub const MAX_VARINT_LEN: usize = 10;

/// Continuation bit mask (bit 7).
const CONTINUATION_BIT: u8 = 0x80;

/// Data bits mask (bits 0-6).
const DATA_MASK: u8 = 0x7F;

/// Outcome of a failed varint decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// Input ended while the continuation bit was still set.
    UnexpectedEof,
    /// More than 10 bytes, or bits beyond u64.
    Overflow,
}

/// Encode a u64 as ULEB128 into a fixed array, returning it with its length.
#[inline]
pub fn encode_varint(mut value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut i = 0;
    loop {
        let byte = (value & u64::from(DATA_MASK)) as u8;
        value >>= 7;
        if value == 0 {
            buf[i] = byte;
            return (buf, i + 1);
        }
        buf[i] = byte | CONTINUATION_BIT;
        i += 1;
    }
}

/// Decode a ULEB128 varint from the front of `buf`.
///
/// Returns `(value, bytes_consumed)`.
#[inline]
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(VarintError::Overflow);
        }
        let data = u64::from(byte & DATA_MASK);
        // 10th byte: only bit 0 still fits in a u64
        if shift == 63 && data > 1 {
            return Err(VarintError::Overflow);
        }
        result |= data << shift;
        if byte & CONTINUATION_BIT == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    Err(VarintError::UnexpectedEof)
}

/// ZigZag-map a signed value onto an unsigned one.
#[inline]
#[must_use]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
#[must_use]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
