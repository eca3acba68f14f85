// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec abstraction.
//!
//! A [`Codec<T>`] writes and reads the body of one `T`; the leading
//! descriptor is the job of [`ObjectWriter::write_value`] and
//! [`ObjectReader::read_value`]. Codecs hold no per-call state: every
//! encode runs over its own writer, so one codec set serves all threads.
//!
//! The registry stores codecs as a tagged [`CodecKind`]:
//!
//! - [`CodecKind::Custom`]: a hand-written codec, type-erased.
//! - [`CodecKind::Record`]: the generic field codec for a [`Record`](crate::Record).

pub mod builtin;
mod io;
mod record;
pub mod ticket;

pub use io::{ObjectReader, ObjectWriter};
pub use record::RecordCodec;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Result, TranscodeError};
use crate::object::Object;

/// Serialize and deserialize the body of a `T`.
pub trait Codec<T>: Send + Sync + 'static {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &T) -> Result<()>;

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<T>;
}

/// Object-safe form of [`Codec`], produced by [`CodecKind::custom`].
pub trait ErasedCodec: Send + Sync {
    fn write_erased(&self, writer: &mut ObjectWriter<'_>, value: &dyn Object) -> Result<()>;

    fn read_erased(&self, reader: &mut ObjectReader<'_>) -> Result<Box<dyn Object>>;
}

struct TypedCodec<T, C> {
    codec: C,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Object, C: Codec<T>> ErasedCodec for TypedCodec<T, C> {
    fn write_erased(&self, writer: &mut ObjectWriter<'_>, value: &dyn Object) -> Result<()> {
        let value = value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| TranscodeError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: value.type_name(),
            })?;
        self.codec.write(writer, value)
    }

    fn read_erased(&self, reader: &mut ObjectReader<'_>) -> Result<Box<dyn Object>> {
        Ok(Box::new(self.codec.read(reader)?))
    }
}

/// Codec as stored in the registry.
#[derive(Clone)]
pub enum CodecKind {
    Custom(Arc<dyn ErasedCodec>),
    Record(RecordCodec),
}

impl CodecKind {
    pub fn custom<T: Object, C: Codec<T>>(codec: C) -> Self {
        CodecKind::Custom(Arc::new(TypedCodec {
            codec,
            _marker: PhantomData,
        }))
    }

    pub fn write(&self, writer: &mut ObjectWriter<'_>, value: &dyn Object) -> Result<()> {
        match self {
            CodecKind::Custom(codec) => codec.write_erased(writer, value),
            CodecKind::Record(_) => {
                let record = value.as_record().ok_or(TranscodeError::UnregisteredType {
                    type_name: value.type_name(),
                })?;
                RecordCodec::write_fields(writer, record)
            }
        }
    }

    pub fn read(&self, reader: &mut ObjectReader<'_>) -> Result<Box<dyn Object>> {
        match self {
            CodecKind::Custom(codec) => codec.read_erased(reader),
            CodecKind::Record(codec) => codec.read(reader),
        }
    }
}

impl fmt::Debug for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Custom(_) => f.write_str("Custom"),
            CodecKind::Record(codec) => f.debug_tuple("Record").field(&codec.name()).finish(),
        }
    }
}
