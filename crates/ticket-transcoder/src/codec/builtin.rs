// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codecs for value types and the generic containers.
//!
//! | Type            | Body                                              |
//! |-----------------|---------------------------------------------------|
//! | `bool`          | one byte, `0` or `1`                              |
//! | `i32`, `i64`    | zigzag varint                                     |
//! | `f64`           | 8 bytes little-endian                             |
//! | `String`        | varint length + UTF-8                             |
//! | `DateTime<Utc>` | zigzag varint seconds + varint subsecond nanos    |
//! | `List`          | varint count + non-null objects                   |
//! | `Map`           | varint count + (key, non-null object), key order  |

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Result, TranscodeError};
use crate::object::{List, Map};

use super::{Codec, ObjectReader, ObjectWriter};

pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &bool) -> Result<()> {
        writer.write_bool(*value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<bool> {
        reader.read_bool()
    }
}

pub struct I32Codec;

impl Codec<i32> for I32Codec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &i32) -> Result<()> {
        writer.write_i32(*value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<i32> {
        reader.read_i32()
    }
}

pub struct I64Codec;

impl Codec<i64> for I64Codec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &i64) -> Result<()> {
        writer.write_i64(*value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<i64> {
        reader.read_i64()
    }
}

pub struct F64Codec;

impl Codec<f64> for F64Codec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &f64) -> Result<()> {
        writer.write_f64(*value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<f64> {
        reader.read_f64()
    }
}

pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &String) -> Result<()> {
        writer.write_str(value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<String> {
        reader.read_string()
    }
}

pub struct DateTimeCodec;

impl Codec<DateTime<Utc>> for DateTimeCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &DateTime<Utc>) -> Result<()> {
        write_timestamp(writer, value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<DateTime<Utc>> {
        read_timestamp(reader)
    }
}

pub struct ListCodec;

impl Codec<List> for ListCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &List) -> Result<()> {
        writer.write_len(value.len())?;
        for item in value {
            writer.write_value(&**item)?;
        }
        Ok(())
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<List> {
        let count = reader.read_len()?;
        let mut list = List::with_capacity(count);
        for _ in 0..count {
            list.push(reader.read_value()?);
        }
        Ok(list)
    }
}

pub struct MapCodec;

impl Codec<Map> for MapCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &Map) -> Result<()> {
        write_map_entries(writer, value)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<Map> {
        read_map_entries(reader)
    }
}

/// Timestamp body without descriptor, for codecs embedding a date inline.
pub fn write_timestamp(writer: &mut ObjectWriter<'_>, value: &DateTime<Utc>) -> Result<()> {
    writer.write_i64(value.timestamp())?;
    writer.write_u32(value.timestamp_subsec_nanos())
}

pub fn read_timestamp(reader: &mut ObjectReader<'_>) -> Result<DateTime<Utc>> {
    let offset = reader.offset();
    let secs = reader.read_i64()?;
    let nanos = reader.read_u32()?;
    Utc.timestamp_opt(secs, nanos).single().ok_or_else(|| {
        TranscodeError::Malformed(format!(
            "timestamp out of range at offset {}: {}s {}ns",
            offset, secs, nanos
        ))
    })
}

/// Map body without descriptor. Entries are written in key order so equal
/// maps encode to equal bytes.
pub fn write_map_entries(writer: &mut ObjectWriter<'_>, map: &Map) -> Result<()> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    writer.write_len(entries.len())?;
    for (key, value) in entries {
        writer.write_str(key)?;
        writer.write_value(&**value)?;
    }
    Ok(())
}

pub fn read_map_entries(reader: &mut ObjectReader<'_>) -> Result<Map> {
    let count = reader.read_len()?;
    let mut map = Map::with_capacity(count);
    for _ in 0..count {
        let key = reader.read_string()?;
        let value = reader.read_value()?;
        if map.insert(key, value).is_some() {
            return Err(TranscodeError::Malformed("duplicate map key".into()));
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;
    use crate::registry::{Registry, RegistryPolicy};
    use crate::ser::ScratchBuffer;

    fn roundtrip(value: &dyn Object) -> (Vec<u8>, Box<dyn Object>) {
        let registry = Registry::with_builtins(RegistryPolicy::FailClosed);
        let mut scratch = ScratchBuffer::allocate(4096).expect("allocate");
        let written = {
            let mut writer = ObjectWriter::new(&registry, scratch.cursor());
            writer.write_value(value).expect("write");
            writer.offset()
        };
        let bytes = scratch.into_written(written);
        let decoded = {
            let mut reader = ObjectReader::new(&registry, &bytes);
            let decoded = reader.read_value().expect("read");
            assert!(reader.is_eof());
            decoded
        };
        (bytes, decoded)
    }

    #[test]
    fn test_value_types_roundtrip() {
        let values: Vec<Box<dyn Object>> = vec![
            Box::new(true) as Box<dyn Object>,
            Box::new(i32::MIN),
            Box::new(i64::MAX),
            Box::new(-0.5f64),
            Box::new(String::from("héllo")),
            Box::new(Utc.timestamp_opt(1_700_000_000, 123_456_789).single().expect("ts")),
        ];
        for value in values {
            let (_, decoded) = roundtrip(&*value);
            assert!(decoded.eq_object(&*value), "{:?} != {:?}", decoded, value);
        }
    }

    #[test]
    fn test_small_ints_are_compact() {
        let (bytes, _) = roundtrip(&-1i64);
        assert_eq!(bytes.len(), 2, "descriptor + one zigzag byte");
    }

    #[test]
    fn test_map_encoding_is_key_ordered() {
        let mut a = Map::new();
        let mut b = Map::new();
        for key in ["uid", "mail", "cn", "memberOf"] {
            a.insert(key.to_string(), Box::new(key.len() as i64) as Box<dyn Object>);
        }
        for key in ["memberOf", "cn", "mail", "uid"] {
            b.insert(key.to_string(), Box::new(key.len() as i64) as Box<dyn Object>);
        }
        let (bytes_a, decoded) = roundtrip(&a);
        let (bytes_b, _) = roundtrip(&b);
        assert_eq!(bytes_a, bytes_b);
        assert!(decoded.eq_object(&a));
    }

    #[test]
    fn test_nested_containers_roundtrip() {
        let inner: List = vec![
            Box::new(String::from("staff")) as Box<dyn Object>,
            Box::new(String::from("faculty")),
        ];
        let mut map = Map::new();
        map.insert("groups".into(), Box::new(inner));
        map.insert("since".into(), Box::new(Utc.timestamp_opt(0, 0).single().expect("epoch")));
        let list: List = vec![Box::new(map) as Box<dyn Object>, Box::new(3i32)];
        let (_, decoded) = roundtrip(&list);
        assert!(decoded.eq_object(&list));
    }

    #[test]
    fn test_timestamp_out_of_range_is_malformed() {
        let registry = Registry::with_builtins(RegistryPolicy::FailClosed);
        let mut scratch = ScratchBuffer::allocate(32).expect("allocate");
        let written = {
            let mut writer = ObjectWriter::new(&registry, scratch.cursor());
            writer.write_i64(i64::MAX).expect("secs");
            writer.write_u32(0).expect("nanos");
            writer.offset()
        };
        let bytes = scratch.into_written(written);
        let mut reader = ObjectReader::new(&registry, &bytes);
        assert!(matches!(read_timestamp(&mut reader), Err(TranscodeError::Malformed(_))));
    }
}
