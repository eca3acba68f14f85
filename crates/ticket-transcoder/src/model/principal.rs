// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::object::{Map, Object};

/// Authenticated subject with its resolved attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePrincipal {
    pub id: String,
    pub attributes: Map,
}

impl SimplePrincipal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Object) -> Self {
        self.attributes.insert(name.into(), Box::new(value));
        self
    }
}

crate::impl_object!(SimplePrincipal);
