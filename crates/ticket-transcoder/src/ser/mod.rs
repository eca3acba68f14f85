// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-level serialization primitives used by every codec.
//!
//! - [`CursorMut`] writes into a fixed-capacity scratch buffer and reports
//!   exhaustion instead of growing, so the encoder can decide how to retry.
//! - [`Cursor`] reads from an encoded record and reports truncation.
//! - [`ScratchBuffer`] owns the per-encode allocation.

pub mod cursor;
pub mod scratch;
pub mod varint;

pub use cursor::{Cursor, CursorMut};
pub use scratch::ScratchBuffer;

use std::fmt;

/// Serialization error raised by the cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerError {
    /// Write would run past the end of the scratch buffer.
    Exhausted { offset: usize, capacity: usize },
    /// Read would run past the end of the input.
    UnexpectedEof { offset: usize, needed: usize },
    /// Varint longer than 10 bytes or wider than the target integer.
    VarintOverflow { offset: usize },
    /// String payload is not valid UTF-8.
    InvalidUtf8 { offset: usize },
}

impl fmt::Display for SerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerError::Exhausted { offset, capacity } => {
                write!(f, "write failed at offset {}: buffer of {} bytes exhausted", offset, capacity)
            }
            SerError::UnexpectedEof { offset, needed } => {
                write!(f, "read failed at offset {}: {} more bytes needed", offset, needed)
            }
            SerError::VarintOverflow { offset } => write!(f, "varint overflow at offset {}", offset),
            SerError::InvalidUtf8 { offset } => write!(f, "invalid utf-8 string at offset {}", offset),
        }
    }
}

impl std::error::Error for SerError {}

pub type SerResult<T> = core::result::Result<T, SerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TranscodeError;

    #[test]
    fn test_ser_error_display_variants() {
        let err = SerError::Exhausted {
            offset: 12,
            capacity: 12,
        };
        assert_eq!(
            err.to_string(),
            "write failed at offset 12: buffer of 12 bytes exhausted"
        );

        let err = SerError::UnexpectedEof { offset: 4, needed: 2 };
        assert_eq!(err.to_string(), "read failed at offset 4: 2 more bytes needed");
    }

    #[test]
    fn test_ser_error_maps_onto_transcode_taxonomy() {
        let err: TranscodeError = SerError::Exhausted {
            offset: 8,
            capacity: 8,
        }
        .into();
        assert!(matches!(err, TranscodeError::BufferExhausted { capacity: 8, .. }));

        let err: TranscodeError = SerError::UnexpectedEof { offset: 3, needed: 5 }.into();
        assert!(matches!(
            err,
            TranscodeError::TruncatedRecord {
                offset: 3,
                needed: 5
            }
        ));

        let err: TranscodeError = SerError::InvalidUtf8 { offset: 0 }.into();
        assert!(matches!(err, TranscodeError::Malformed(_)));
    }
}
