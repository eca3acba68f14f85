// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use chrono::{DateTime, Utc};

use crate::error::{Result, TranscodeError};
use crate::object::{downcast, Map, Object};
use crate::record::{FieldRef, FieldValue};

use super::SimplePrincipal;

/// Authentication frozen at ticket creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableAuthentication {
    pub principal: SimplePrincipal,
    pub attributes: Map,
    pub authenticated_date: DateTime<Utc>,
}

impl ImmutableAuthentication {
    pub fn new(principal: SimplePrincipal, authenticated_date: DateTime<Utc>) -> Self {
        Self {
            principal,
            attributes: Map::new(),
            authenticated_date,
        }
    }
}

crate::impl_object!(ImmutableAuthentication);

/// Authentication whose attributes may still change, e.g. remember-me.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableAuthentication {
    pub principal: SimplePrincipal,
    pub attributes: Map,
    pub authenticated_date: DateTime<Utc>,
}

crate::impl_object!(MutableAuthentication);

#[derive(Debug, Clone, PartialEq)]
pub enum Authentication {
    Immutable(ImmutableAuthentication),
    Mutable(MutableAuthentication),
}

impl Authentication {
    pub fn principal(&self) -> &SimplePrincipal {
        match self {
            Authentication::Immutable(auth) => &auth.principal,
            Authentication::Mutable(auth) => &auth.principal,
        }
    }

    pub fn as_object(&self) -> &dyn Object {
        match self {
            Authentication::Immutable(auth) => auth,
            Authentication::Mutable(auth) => auth,
        }
    }

    pub fn from_object(object: Box<dyn Object>) -> Result<Self> {
        let any = object.as_any();
        if any.is::<ImmutableAuthentication>() {
            downcast(object).map(Authentication::Immutable)
        } else if any.is::<MutableAuthentication>() {
            downcast(object).map(Authentication::Mutable)
        } else {
            Err(TranscodeError::TypeMismatch {
                expected: "Authentication",
                found: object.type_name(),
            })
        }
    }
}

impl From<ImmutableAuthentication> for Authentication {
    fn from(auth: ImmutableAuthentication) -> Self {
        Authentication::Immutable(auth)
    }
}

impl From<MutableAuthentication> for Authentication {
    fn from(auth: MutableAuthentication) -> Self {
        Authentication::Mutable(auth)
    }
}

impl FieldValue for Authentication {
    fn to_field(&self) -> FieldRef<'_> {
        FieldRef::Borrowed(self.as_object())
    }

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self> {
        Authentication::from_object(<Box<dyn Object> as FieldValue>::from_field(value)?)
    }
}
