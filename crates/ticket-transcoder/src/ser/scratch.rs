// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-encode scratch allocation.

use crate::error::{Result, TranscodeError};

use super::CursorMut;

/// Zero-filled buffer owned by exactly one in-flight encode.
///
/// Growing means allocating a fresh, larger `ScratchBuffer`; a buffer is
/// never resized in place or handed to another encode.
pub struct ScratchBuffer {
    bytes: Vec<u8>,
}

impl ScratchBuffer {
    /// Allocate `capacity` bytes, reporting allocator refusal as an error
    /// instead of aborting.
    pub fn allocate(capacity: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| TranscodeError::AllocationFailed {
                requested: capacity,
            })?;
        bytes.resize(capacity, 0);
        Ok(Self { bytes })
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn cursor(&mut self) -> CursorMut<'_> {
        CursorMut::new(&mut self.bytes)
    }

    /// Copy out exactly the first `len` written bytes.
    pub fn into_written(self, len: usize) -> Vec<u8> {
        let mut bytes = self.bytes;
        bytes.truncate(len);
        if bytes.capacity() > len.saturating_mul(2) {
            bytes.shrink_to_fit();
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_into_written_drops_unused_tail() {
        let mut scratch = ScratchBuffer::allocate(32).expect("allocate");
        assert_eq!(scratch.capacity(), 32);
        let written = {
            let mut cursor = scratch.cursor();
            cursor.write_str("ST-42").expect("write");
            cursor.offset()
        };
        let bytes = scratch.into_written(written);
        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[1..], b"ST-42");
    }

    #[test]
    fn test_scratch_absurd_allocation_fails_cleanly() {
        let err = ScratchBuffer::allocate(usize::MAX).err().expect("must fail");
        assert!(matches!(
            err,
            TranscodeError::AllocationFailed { requested } if requested == usize::MAX
        ));
    }
}
