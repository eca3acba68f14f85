// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic field codec.
//!
//! Layout: field count, then per field (sorted by name) the field name and
//! the nested object (nullable, with its own descriptor). Larger than a
//! hand-tuned codec, and renaming a field breaks previously cached bytes.

use crate::error::{Result, TranscodeError};
use crate::object::Object;
use crate::record::{FromRecord, Fields, Record};

use super::{ObjectReader, ObjectWriter};

type BuildFn = fn(&mut Fields) -> Result<Box<dyn Object>>;

fn build<T: FromRecord>(fields: &mut Fields) -> Result<Box<dyn Object>> {
    Ok(Box::new(T::from_fields(fields)?))
}

/// Field codec bound to one [`FromRecord`] type.
#[derive(Clone, Copy)]
pub struct RecordCodec {
    name: &'static str,
    build: BuildFn,
}

impl RecordCodec {
    pub const fn of<T: FromRecord>() -> Self {
        Self {
            name: T::RECORD_NAME,
            build: build::<T>,
        }
    }

    /// Record name of the bound type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn write_fields(writer: &mut ObjectWriter<'_>, record: &dyn Record) -> Result<()> {
        let mut fields = record.fields();
        fields.sort_by(|a, b| a.name.cmp(b.name));
        writer.write_len(fields.len())?;
        for field in &fields {
            writer.write_str(field.name)?;
            writer.write_object(field.value.as_object())?;
        }
        Ok(())
    }

    pub fn read(&self, reader: &mut ObjectReader<'_>) -> Result<Box<dyn Object>> {
        let count = reader.read_len()?;
        let mut fields = Fields::with_capacity(count);
        for _ in 0..count {
            let name = reader.read_string()?;
            let value = reader.read_object()?;
            if !fields.insert(name.clone(), value) {
                return Err(TranscodeError::Malformed(format!(
                    "{}: duplicate field `{}`",
                    self.name, name
                )));
            }
        }
        let object = (self.build)(&mut fields)?;
        if !fields.is_empty() {
            return Err(TranscodeError::Malformed(format!(
                "{}: {} undeclared fields",
                self.name,
                fields.len()
            )));
        }
        Ok(object)
    }
}

impl std::fmt::Debug for RecordCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordCodec").field("name", &self.name).finish()
    }
}
