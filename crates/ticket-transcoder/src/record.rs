// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared-field view of objects for the generic record codec.
//!
//! A type opts in by implementing [`Record`] (walk fields) and
//! [`FromRecord`] (rebuild from fields), then `impl_object!(T, record)`.
//! Such a type can be registered with
//! [`Registry::register_record`](crate::Registry::register_record) or, under
//! fail-open policy, left unregistered entirely.
//!
//! ```rust
//! use ticket_transcoder::{impl_object, Field, Fields, FromRecord, Record, Result};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Consent {
//!     service: String,
//!     granted: bool,
//! }
//!
//! impl Record for Consent {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new("service", &self.service), Field::new("granted", &self.granted)]
//!     }
//! }
//!
//! impl FromRecord for Consent {
//!     const RECORD_NAME: &'static str = "example.Consent";
//!
//!     fn from_fields(fields: &mut Fields) -> Result<Self> {
//!         Ok(Self {
//!             service: fields.take("service")?,
//!             granted: fields.take("granted")?,
//!         })
//!     }
//! }
//!
//! impl_object!(Consent, record);
//! ```

use std::collections::HashMap;

use crate::codec::RecordCodec;
use crate::error::{Result, TranscodeError};
use crate::object::Object;

/// Object whose state is a list of named fields.
pub trait Record: Object {
    /// Declared fields. Order is irrelevant; the codec sorts by name.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Rebuild a [`Record`] from decoded fields.
pub trait FromRecord: Record + Sized {
    /// Stable name written on the wire for unregistered (fail-open) records.
    const RECORD_NAME: &'static str;

    fn from_fields(fields: &mut Fields) -> Result<Self>;
}

/// Borrowed or synthesized field value.
pub enum FieldRef<'a> {
    Null,
    Borrowed(&'a dyn Object),
    /// Built on the fly, e.g. a typed collection converted to a [`List`](crate::List).
    Owned(Box<dyn Object>),
}

impl FieldRef<'_> {
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            FieldRef::Null => None,
            FieldRef::Borrowed(object) => Some(*object),
            FieldRef::Owned(object) => Some(&**object),
        }
    }
}

/// A named field of a [`Record`].
pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldRef<'a>,
}

impl<'a> Field<'a> {
    pub fn new<V: FieldValue>(name: &'static str, value: &'a V) -> Self {
        Self {
            name,
            value: value.to_field(),
        }
    }

    pub fn owned(name: &'static str, value: Box<dyn Object>) -> Self {
        Self {
            name,
            value: FieldRef::Owned(value),
        }
    }
}

/// Conversion between a typed field and its nullable erased form.
///
/// Generated by `impl_object!` for concrete objects; implemented by hand for
/// closed families such as [`ExpirationPolicy`](crate::model::ExpirationPolicy).
pub trait FieldValue: Sized {
    fn to_field(&self) -> FieldRef<'_>;

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self>;
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_field(&self) -> FieldRef<'_> {
        match self {
            Some(value) => value.to_field(),
            None => FieldRef::Null,
        }
    }

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self> {
        value.map(|object| T::from_field(Some(object))).transpose()
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_field(&self) -> FieldRef<'_> {
        (**self).to_field()
    }

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self> {
        T::from_field(value).map(Box::new)
    }
}

impl FieldValue for Box<dyn Object> {
    fn to_field(&self) -> FieldRef<'_> {
        FieldRef::Borrowed(&**self)
    }

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self> {
        value.ok_or_else(|| TranscodeError::Malformed("null where object expected".into()))
    }
}

/// Decoded fields of one record, consumed by [`FromRecord::from_fields`].
#[derive(Debug, Default)]
pub struct Fields {
    values: HashMap<String, Option<Box<dyn Object>>>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
        }
    }

    /// Returns false if the field name was already present.
    pub fn insert(&mut self, name: String, value: Option<Box<dyn Object>>) -> bool {
        self.values.insert(name, value).is_none()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove a field and convert it. A missing field reads as null.
    pub fn take<V: FieldValue>(&mut self, name: &str) -> Result<V> {
        let value = self.values.remove(name).flatten();
        V::from_field(value).map_err(|err| match err {
            TranscodeError::TypeMismatch { expected, found } => TranscodeError::Malformed(format!(
                "field `{}`: expected {}, found {}",
                name, expected, found
            )),
            TranscodeError::Malformed(reason) => {
                TranscodeError::Malformed(format!("field `{}`: {}", name, reason))
            }
            other => other,
        })
    }
}

/// Link-time catalog entry for a record type.
///
/// Submitted by `impl_object!(T, record)`; lets a fail-open decoder rebuild
/// a record from its wire name without any registration.
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
    pub name: &'static str,
    pub codec: RecordCodec,
}

impl RecordType {
    pub const fn of<T: FromRecord>() -> Self {
        Self {
            name: T::RECORD_NAME,
            codec: RecordCodec::of::<T>(),
        }
    }
}

inventory::collect!(RecordType);

/// Snapshot of every linked record type, keyed by wire name.
pub(crate) fn catalog() -> HashMap<&'static str, RecordCodec> {
    let mut catalog = HashMap::new();
    for record in inventory::iter::<RecordType> {
        if catalog.insert(record.name, record.codec).is_some() {
            log::warn!(
                "[RecordCatalog] duplicate record name {:?}, keeping the last one linked",
                record.name
            );
        }
    }
    catalog
}
