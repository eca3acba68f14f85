// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: runtime type <-> descriptor <-> codec.
//!
//! A [`Registry`] is built once (built-ins first, then caller extensions)
//! and then shared read-only behind an `Arc`. Mutation needs `&mut`, so the
//! single-writer-then-many-readers discipline is enforced by ownership.
//!
//! # Descriptors
//!
//! | Range       | Meaning                                       |
//! |-------------|-----------------------------------------------|
//! | `0`         | null reference                                |
//! | `1`         | generic record, followed by its record name   |
//! | `2..1024`   | built-in types (see [`descriptors`])          |
//! | `1024..`    | caller extension types                        |
//!
//! Every type carries the descriptor it was declared with, never one derived
//! from registration order, so a reader that lacks a writer's extension sees
//! an unknown descriptor instead of some other type.

mod builtins;

pub use builtins::descriptors;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::codec::{Codec, CodecKind, RecordCodec};
use crate::error::{Result, TranscodeError};
use crate::object::Object;
use crate::record::{self, FromRecord, Record};

/// Lowest descriptor the built-in table never uses.
pub const FIRST_EXTENSION_DESCRIPTOR: u32 = 1024;

/// Identifier of a registered type, embedded as a varint in every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor(u32);

impl TypeDescriptor {
    /// Null reference.
    pub const NULL: TypeDescriptor = TypeDescriptor(0);
    /// Unregistered record written by the generic codec (fail-open only).
    pub const GENERIC: TypeDescriptor = TypeDescriptor(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_reserved(self) -> bool {
        self.0 <= Self::GENERIC.0
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Behavior for objects whose type has no [`CodecEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config-loaders",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RegistryPolicy {
    /// Unknown types are an error.
    FailClosed,
    /// Unregistered types that implement [`Record`] (via
    /// `impl_object!(T, record)`) fall back to the generic field codec.
    /// Other unregistered types are still an error.
    #[default]
    FailOpen,
}

/// A registered `(descriptor, type, codec)` triple.
#[derive(Debug, Clone)]
pub struct CodecEntry {
    descriptor: TypeDescriptor,
    type_id: TypeId,
    type_name: &'static str,
    codec: CodecKind,
}

impl CodecEntry {
    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn codec(&self) -> &CodecKind {
        &self.codec
    }
}

/// A caller-supplied registration, merged with [`Registry::add`].
///
/// A registration for a type not yet in the registry must be
/// [`pinned`](Self::pinned); an unpinned one only swaps the codec of a type
/// that already has a descriptor.
#[derive(Debug, Clone)]
pub struct Registration {
    descriptor: Option<TypeDescriptor>,
    type_id: TypeId,
    type_name: &'static str,
    codec: CodecKind,
}

impl Registration {
    /// Hand-written codec for `T`.
    pub fn new<T: Object, C: Codec<T>>(codec: C) -> Self {
        Self {
            descriptor: None,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            codec: CodecKind::custom(codec),
        }
    }

    /// Generic field codec for `T`.
    pub fn record<T: FromRecord>() -> Self {
        Self {
            descriptor: None,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            codec: CodecKind::Record(RecordCodec::of::<T>()),
        }
    }

    /// Declare the descriptor the type is written with.
    pub fn pinned(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Outcome of [`Registry::resolve_by_type`].
pub enum Resolution<'a> {
    Registered(&'a CodecEntry),
    /// Fail-open fallback: written as [`TypeDescriptor::GENERIC`] + record name.
    Generic(&'a dyn Record),
}

/// Mapping from types to codecs plus the unknown-type policy.
pub struct Registry {
    policy: RegistryPolicy,
    by_type: HashMap<TypeId, CodecEntry>,
    by_descriptor: HashMap<TypeDescriptor, TypeId>,
    catalog: HashMap<&'static str, RecordCodec>,
}

impl Registry {
    /// Empty registry: no built-ins.
    pub fn new(policy: RegistryPolicy) -> Self {
        Self {
            policy,
            by_type: HashMap::new(),
            by_descriptor: HashMap::new(),
            catalog: record::catalog(),
        }
    }

    /// Registry preloaded with the ticket domain and value types.
    pub fn with_builtins(policy: RegistryPolicy) -> Self {
        let mut registry = Self::new(policy);
        builtins::register_builtins(&mut registry);
        log::debug!(
            "[Registry] {} built-in types registered (policy={:?})",
            registry.len(),
            policy
        );
        registry
    }

    pub fn policy(&self) -> RegistryPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RegistryPolicy) {
        self.policy = policy;
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Entries sorted by descriptor.
    pub fn entries(&self) -> Vec<&CodecEntry> {
        let mut entries: Vec<_> = self.by_type.values().collect();
        entries.sort_by_key(|entry| entry.descriptor);
        entries
    }

    /// Register `T` with a hand-written codec under `descriptor`.
    ///
    /// Registering the same type again replaces its codec (later wins).
    pub fn register<T: Object, C: Codec<T>>(
        &mut self,
        descriptor: TypeDescriptor,
        codec: C,
    ) -> Result<TypeDescriptor> {
        self.add(Registration::new::<T, C>(codec).pinned(descriptor))
    }

    /// Register `T` with the generic field codec under `descriptor`.
    pub fn register_record<T: FromRecord>(
        &mut self,
        descriptor: TypeDescriptor,
    ) -> Result<TypeDescriptor> {
        self.add(Registration::record::<T>().pinned(descriptor))
    }

    /// Swap the codec of an already-registered `T`, keeping its descriptor.
    pub fn replace<T: Object, C: Codec<T>>(&mut self, codec: C) -> Result<TypeDescriptor> {
        self.add(Registration::new::<T, C>(codec))
    }

    /// Merge one registration; the later registration of a type wins.
    pub fn add(&mut self, registration: Registration) -> Result<TypeDescriptor> {
        let descriptor = match registration.descriptor {
            Some(descriptor) => descriptor,
            None => match self.by_type.get(&registration.type_id) {
                Some(existing) => existing.descriptor,
                None => {
                    return Err(TranscodeError::UndeclaredDescriptor {
                        type_name: registration.type_name,
                    })
                }
            },
        };
        if descriptor.is_reserved() {
            return Err(TranscodeError::ReservedDescriptor(descriptor));
        }
        if let Some(bound) = self.by_descriptor.get(&descriptor) {
            if *bound != registration.type_id {
                let existing = self
                    .by_type
                    .get(bound)
                    .map_or("<unknown>", |entry| entry.type_name);
                return Err(TranscodeError::DescriptorConflict {
                    descriptor,
                    existing,
                });
            }
        }
        self.bind(descriptor, registration);
        Ok(descriptor)
    }

    /// Merge several registrations in order, stopping at the first error.
    pub fn extend<I>(&mut self, registrations: I) -> Result<()>
    where
        I: IntoIterator<Item = Registration>,
    {
        for registration in registrations {
            self.add(registration)?;
        }
        Ok(())
    }

    /// Codec entry for the runtime type of `value`.
    pub fn resolve_by_type<'a>(&'a self, value: &'a dyn Object) -> Result<Resolution<'a>> {
        let type_id = Any::type_id(value.as_any());
        if let Some(entry) = self.by_type.get(&type_id) {
            return Ok(Resolution::Registered(entry));
        }
        match (self.policy, value.as_record()) {
            (RegistryPolicy::FailOpen, Some(record)) => Ok(Resolution::Generic(record)),
            _ => Err(TranscodeError::UnregisteredType {
                type_name: value.type_name(),
            }),
        }
    }

    pub fn resolve_by_descriptor(&self, descriptor: TypeDescriptor) -> Result<&CodecEntry> {
        self.by_descriptor
            .get(&descriptor)
            .and_then(|type_id| self.by_type.get(type_id))
            .ok_or(TranscodeError::UnknownDiscriminator(descriptor))
    }

    /// Codec for a generic record read under fail-open policy.
    pub fn resolve_record(&self, name: &str) -> Result<RecordCodec> {
        if self.policy == RegistryPolicy::FailClosed {
            return Err(TranscodeError::UnknownDiscriminator(TypeDescriptor::GENERIC));
        }
        self.catalog
            .get(name)
            .copied()
            .ok_or_else(|| TranscodeError::UnknownRecordType(name.to_owned()))
    }

    pub fn entry_for<T: Object>(&self) -> Option<&CodecEntry> {
        self.by_type.get(&TypeId::of::<T>())
    }

    pub fn descriptor_of<T: Object>(&self) -> Option<TypeDescriptor> {
        self.entry_for::<T>().map(CodecEntry::descriptor)
    }

    /// Unchecked insert; callers have validated `descriptor`.
    fn bind(&mut self, descriptor: TypeDescriptor, registration: Registration) {
        let entry = CodecEntry {
            descriptor,
            type_id: registration.type_id,
            type_name: registration.type_name,
            codec: registration.codec,
        };
        if let Some(previous) = self.by_type.insert(entry.type_id, entry) {
            log::debug!(
                "[Registry] replaced codec for {} ({})",
                previous.type_name,
                previous.descriptor
            );
            if previous.descriptor != descriptor {
                self.by_descriptor.remove(&previous.descriptor);
            }
        } else {
            log::debug!(
                "[Registry] registered {} as {}",
                registration.type_name,
                descriptor
            );
        }
        self.by_descriptor.insert(descriptor, registration.type_id);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins(RegistryPolicy::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("policy", &self.policy)
            .field("types", &self.by_type.len())
            .field("records", &self.catalog.len())
            .finish()
    }
}
