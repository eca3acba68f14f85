// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-erased objects.
//!
//! Anything the transcoder stores implements [`Object`]: the ticket domain
//! types, the value types their fields use (strings, dates, integers) and the
//! generic [`List`] / [`Map`] containers. Implementations are generated with
//! [`impl_object!`](crate::impl_object).
//!
//! ```rust
//! use ticket_transcoder::{impl_object, Object};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Counter(i64);
//! impl_object!(Counter);
//!
//! let boxed: Box<dyn Object> = Box::new(Counter(3));
//! assert!(boxed.eq_object(&Counter(3)));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, TranscodeError};
use crate::record::Record;

/// A value the registry can resolve and a codec can write.
pub trait Object: Any + fmt::Debug + Send + Sync {
    /// Name used in diagnostics and, for records, on the wire.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    fn clone_object(&self) -> Box<dyn Object>;

    /// Observational equality across erased objects.
    fn eq_object(&self, other: &dyn Object) -> bool;

    /// Declared-field view used by the generic record codec.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }
}

impl Clone for Box<dyn Object> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

impl PartialEq for dyn Object {
    fn eq(&self, other: &Self) -> bool {
        self.eq_object(other)
    }
}

/// Heterogeneous list container (`java.util.ArrayList` counterpart).
pub type List = Vec<Box<dyn Object>>;

/// String-keyed attribute map (`java.util.HashMap` counterpart).
pub type Map = HashMap<String, Box<dyn Object>>;

/// Recover the concrete type of an erased object.
pub fn downcast<T: Object>(object: Box<dyn Object>) -> Result<T> {
    let found = object.type_name();
    object
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| TranscodeError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found,
        })
}

/// Implement [`Object`] (and [`FieldValue`](crate::FieldValue)) for a
/// `Clone + PartialEq + Debug + Send + Sync` type.
///
/// The `record` form additionally exposes the type's declared fields to the
/// generic codec and adds it to the link-time catalog of record types, so a
/// fail-open transcoder can decode it without a registration. It requires
/// [`FromRecord`](crate::FromRecord).
#[macro_export]
macro_rules! impl_object {
    (@erased $ty:ty) => {
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }
        fn into_any(
            self: ::std::boxed::Box<Self>,
        ) -> ::std::boxed::Box<dyn ::core::any::Any + ::core::marker::Send + ::core::marker::Sync> {
            self
        }
        fn clone_object(&self) -> ::std::boxed::Box<dyn $crate::Object> {
            ::std::boxed::Box::new(::core::clone::Clone::clone(self))
        }
        fn eq_object(&self, other: &dyn $crate::Object) -> bool {
            other
                .as_any()
                .downcast_ref::<$ty>()
                .map_or(false, |other| self == other)
        }
    };
    (@field $ty:ty) => {
        impl $crate::FieldValue for $ty {
            fn to_field(&self) -> $crate::FieldRef<'_> {
                $crate::FieldRef::Borrowed(self)
            }
            fn from_field(
                value: ::core::option::Option<::std::boxed::Box<dyn $crate::Object>>,
            ) -> $crate::Result<Self> {
                match value {
                    ::core::option::Option::Some(object) => $crate::object::downcast::<$ty>(object),
                    ::core::option::Option::None => ::core::result::Result::Err(
                        $crate::TranscodeError::Malformed(::std::format!(
                            "null where {} expected",
                            ::core::any::type_name::<$ty>()
                        )),
                    ),
                }
            }
        }
    };
    ($ty:ty) => {
        impl $crate::Object for $ty {
            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<$ty>()
            }
            $crate::impl_object!(@erased $ty);
        }
        $crate::impl_object!(@field $ty);
    };
    ($ty:ty, record) => {
        impl $crate::Object for $ty {
            fn type_name(&self) -> &'static str {
                <$ty as $crate::FromRecord>::RECORD_NAME
            }
            fn as_record(&self) -> ::core::option::Option<&dyn $crate::Record> {
                ::core::option::Option::Some(self)
            }
            $crate::impl_object!(@erased $ty);
        }
        $crate::impl_object!(@field $ty);
        $crate::__private::inventory::submit! {
            $crate::record::RecordType::of::<$ty>()
        }
    };
}

impl_object!(bool);
impl_object!(i32);
impl_object!(i64);
impl_object!(f64);
impl_object!(String);
impl_object!(chrono::DateTime<chrono::Utc>);
impl_object!(List);
impl_object!(Map);
