// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry-aware writer and reader handed to codecs.

use crate::config::MAX_NESTING_DEPTH;
use crate::error::{Result, TranscodeError};
use crate::object::{downcast, Object};
use crate::registry::{Registry, Resolution, TypeDescriptor};
use crate::ser::{Cursor, CursorMut};

use super::RecordCodec;

/// Write side of one encode attempt.
pub struct ObjectWriter<'a> {
    registry: &'a Registry,
    cursor: CursorMut<'a>,
    depth: usize,
}

impl<'a> ObjectWriter<'a> {
    pub fn new(registry: &'a Registry, cursor: CursorMut<'a>) -> Self {
        Self {
            registry,
            cursor,
            depth: 0,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Bytes written so far.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        Ok(self.cursor.write_u8(value)?)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_i64(i64::from(value))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        Ok(self.cursor.write_varint_signed(value)?)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        Ok(self.cursor.write_varint(u64::from(value))?)
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        Ok(self.cursor.write_f64_le(value)?)
    }

    /// Element count or byte length.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        Ok(self.cursor.write_varint(len as u64)?)
    }

    pub fn write_str(&mut self, value: &str) -> Result<()> {
        Ok(self.cursor.write_str(value)?)
    }

    /// Presence byte, then the string if present.
    pub fn write_opt_str(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => {
                self.write_bool(true)?;
                self.write_str(value)
            }
            None => self.write_bool(false),
        }
    }

    /// Nullable nested object: [`TypeDescriptor::NULL`] or a full value.
    pub fn write_object(&mut self, value: Option<&dyn Object>) -> Result<()> {
        match value {
            Some(value) => self.write_value(value),
            None => self.write_descriptor(TypeDescriptor::NULL),
        }
    }

    /// Descriptor of the runtime type of `value`, then its codec's bytes.
    pub fn write_value(&mut self, value: &dyn Object) -> Result<()> {
        let registry = self.registry;
        let resolution = registry.resolve_by_type(value)?;
        self.enter()?;
        let result = match resolution {
            Resolution::Registered(entry) => self
                .write_descriptor(entry.descriptor())
                .and_then(|()| entry.codec().write(self, value)),
            Resolution::Generic(record) => self
                .write_descriptor(TypeDescriptor::GENERIC)
                .and_then(|()| self.write_str(value.type_name()))
                .and_then(|()| RecordCodec::write_fields(self, record)),
        };
        self.depth -= 1;
        result
    }

    fn write_descriptor(&mut self, descriptor: TypeDescriptor) -> Result<()> {
        self.write_u32(descriptor.get())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(TranscodeError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }
}

/// Read side of one decode.
pub struct ObjectReader<'a> {
    registry: &'a Registry,
    cursor: Cursor<'a>,
    depth: usize,
}

impl<'a> ObjectReader<'a> {
    pub fn new(registry: &'a Registry, bytes: &'a [u8]) -> Self {
        Self {
            registry,
            cursor: Cursor::new(bytes),
            depth: 0,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.cursor.read_u8()?)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.cursor.offset();
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(TranscodeError::Malformed(format!(
                "invalid bool byte {:#04x} at offset {}",
                other, offset
            ))),
        }
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let offset = self.cursor.offset();
        let value = self.read_i64()?;
        i32::try_from(value).map_err(|_| {
            TranscodeError::Malformed(format!("i32 out of range at offset {}: {}", offset, value))
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.cursor.read_varint_signed()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.cursor.read_varint_u32()?)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(self.cursor.read_f64_le()?)
    }

    /// Element count; never larger than the bytes left to read.
    pub fn read_len(&mut self) -> Result<usize> {
        Ok(self.cursor.read_len()?)
    }

    pub fn read_str(&mut self) -> Result<&'a str> {
        Ok(self.cursor.read_str()?)
    }

    pub fn read_string(&mut self) -> Result<String> {
        self.read_str().map(str::to_owned)
    }

    pub fn read_opt_string(&mut self) -> Result<Option<String>> {
        if self.read_bool()? {
            self.read_string().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Nullable nested object written by [`ObjectWriter::write_object`].
    pub fn read_object(&mut self) -> Result<Option<Box<dyn Object>>> {
        let descriptor = self.read_descriptor()?;
        if descriptor == TypeDescriptor::NULL {
            return Ok(None);
        }
        self.enter()?;
        let result = self.read_body(descriptor);
        self.depth -= 1;
        result.map(Some)
    }

    /// Non-null nested object written by [`ObjectWriter::write_value`].
    pub fn read_value(&mut self) -> Result<Box<dyn Object>> {
        let offset = self.cursor.offset();
        self.read_object()?.ok_or_else(|| {
            TranscodeError::Malformed(format!("unexpected null at offset {}", offset))
        })
    }

    /// Non-null nested object of a known concrete type.
    pub fn read_value_as<T: Object>(&mut self) -> Result<T> {
        downcast(self.read_value()?)
    }

    fn read_descriptor(&mut self) -> Result<TypeDescriptor> {
        self.read_u32().map(TypeDescriptor::new)
    }

    fn read_body(&mut self, descriptor: TypeDescriptor) -> Result<Box<dyn Object>> {
        let registry = self.registry;
        if descriptor == TypeDescriptor::GENERIC {
            let codec = registry.resolve_record(self.read_str()?)?;
            return codec.read(self);
        }
        registry.resolve_by_descriptor(descriptor)?.codec().read(self)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(TranscodeError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryPolicy;
    use crate::ser::ScratchBuffer;

    fn encode(registry: &Registry, value: &dyn Object) -> Result<Vec<u8>> {
        let mut scratch = ScratchBuffer::allocate(1024)?;
        let written = {
            let mut writer = ObjectWriter::new(registry, scratch.cursor());
            writer.write_value(value)?;
            writer.offset()
        };
        Ok(scratch.into_written(written))
    }

    #[test]
    fn test_null_and_value_envelope() {
        let registry = Registry::with_builtins(RegistryPolicy::FailClosed);
        let mut scratch = ScratchBuffer::allocate(16).expect("allocate");
        let written = {
            let mut writer = ObjectWriter::new(&registry, scratch.cursor());
            writer.write_object(None).expect("null");
            writer.write_object(Some(&7i32)).expect("value");
            writer.offset()
        };
        let bytes = scratch.into_written(written);
        assert_eq!(bytes[0], 0, "null is descriptor 0");

        let mut reader = ObjectReader::new(&registry, &bytes);
        assert!(reader.read_object().expect("null").is_none());
        assert_eq!(reader.read_value_as::<i32>().expect("i32"), 7);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_read_value_rejects_null() {
        let registry = Registry::with_builtins(RegistryPolicy::FailClosed);
        let mut reader = ObjectReader::new(&registry, &[0]);
        assert!(matches!(reader.read_value(), Err(TranscodeError::Malformed(_))));
    }

    #[test]
    fn test_invalid_bool_is_malformed() {
        let registry = Registry::with_builtins(RegistryPolicy::FailClosed);
        let mut reader = ObjectReader::new(&registry, &[2]);
        assert!(matches!(reader.read_bool(), Err(TranscodeError::Malformed(_))));
    }

    #[test]
    fn test_nesting_limit_on_write_and_read() {
        let registry = Registry::with_builtins(RegistryPolicy::FailClosed);
        let mut value: Box<dyn Object> = Box::new(1i64);
        for _ in 0..MAX_NESTING_DEPTH {
            value = Box::new(vec![value]);
        }
        let err = encode(&registry, &*value).unwrap_err();
        assert!(matches!(err, TranscodeError::NestingTooDeep { limit } if limit == MAX_NESTING_DEPTH));

        // MAX_NESTING_DEPTH + 1 lists around an i64, handcrafted.
        let list = crate::registry::descriptors::LIST.get() as u8;
        let mut bytes = Vec::new();
        for _ in 0..=MAX_NESTING_DEPTH {
            bytes.extend_from_slice(&[list, 1]);
        }
        bytes.extend_from_slice(&[crate::registry::descriptors::I64.get() as u8, 2]);
        let mut reader = ObjectReader::new(&registry, &bytes);
        assert!(matches!(
            reader.read_value(),
            Err(TranscodeError::NestingTooDeep { .. })
        ));
    }
}
