// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transcoder error taxonomy.

use thiserror::Error;

use crate::registry::TypeDescriptor;
use crate::ser::SerError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TranscodeError>;

/// Errors raised while registering, encoding or decoding objects.
///
/// Everything except [`TranscodeError::BufferExhausted`] reaches the caller
/// unchanged. Callers normally treat a decode failure as a cache miss.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Encode requested for a type with no codec under fail-closed policy
    /// (or a fail-open type that exposes no declared fields).
    #[error("no codec registered for type {type_name}")]
    UnregisteredType { type_name: &'static str },

    /// Decode met a discriminator absent from this registry.
    #[error("unknown type discriminator {0}")]
    UnknownDiscriminator(TypeDescriptor),

    /// Decode met a generic record whose name no linked type declares.
    #[error("unknown record type {0:?}")]
    UnknownRecordType(String),

    /// Input ended before a codec finished reading.
    #[error("record truncated at offset {offset}: {needed} more bytes needed")]
    TruncatedRecord { offset: usize, needed: usize },

    /// Bytes are present but do not form a valid record.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// A decoded object is not of the requested type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Scratch buffer too small. Internal retry signal of the encoder.
    #[error("scratch buffer exhausted at offset {offset} (capacity {capacity})")]
    BufferExhausted { offset: usize, capacity: usize },

    /// Encoding needs more than the configured maximum buffer size.
    #[error("encoded object exceeds maximum buffer size of {limit} bytes")]
    ObjectTooLarge { limit: usize },

    /// The allocator refused a scratch buffer.
    #[error("failed to allocate a {requested} byte scratch buffer")]
    AllocationFailed { requested: usize },

    #[error("object nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    /// A pinned descriptor is already bound to another type.
    #[error("descriptor {descriptor} already bound to {existing}")]
    DescriptorConflict {
        descriptor: TypeDescriptor,
        existing: &'static str,
    },

    /// A new type was registered without declaring its descriptor.
    #[error("no descriptor declared for {type_name}")]
    UndeclaredDescriptor { type_name: &'static str },

    #[error("descriptor {0} is reserved")]
    ReservedDescriptor(TypeDescriptor),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TranscodeError {
    /// True for errors that mean "these bytes cannot be trusted".
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            TranscodeError::UnknownDiscriminator(_)
                | TranscodeError::UnknownRecordType(_)
                | TranscodeError::TruncatedRecord { .. }
                | TranscodeError::Malformed(_)
                | TranscodeError::TypeMismatch { .. }
        )
    }
}

impl From<SerError> for TranscodeError {
    fn from(err: SerError) -> Self {
        match err {
            SerError::Exhausted { offset, capacity } => {
                TranscodeError::BufferExhausted { offset, capacity }
            }
            SerError::UnexpectedEof { offset, needed } => {
                TranscodeError::TruncatedRecord { offset, needed }
            }
            other @ (SerError::VarintOverflow { .. } | SerError::InvalidUtf8 { .. }) => {
                TranscodeError::Malformed(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranscodeError::UnknownDiscriminator(TypeDescriptor::new(1024));
        assert_eq!(err.to_string(), "unknown type discriminator #1024");

        let err = TranscodeError::UnregisteredType { type_name: "Session" };
        assert_eq!(err.to_string(), "no codec registered for type Session");
    }

    #[test]
    fn test_data_error_classification() {
        assert!(TranscodeError::Malformed("x".into()).is_data_error());
        assert!(TranscodeError::TruncatedRecord { offset: 0, needed: 1 }.is_data_error());
        assert!(!TranscodeError::ObjectTooLarge { limit: 1 }.is_data_error());
        assert!(!TranscodeError::UnregisteredType { type_name: "T" }.is_data_error());
    }
}
