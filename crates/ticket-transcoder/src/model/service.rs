// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;

use crate::error::Result;
use crate::object::{downcast, Map, Object};
use crate::record::{FieldRef, FieldValue};

/// Plain web application requesting a service ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleWebApplicationService {
    pub id: String,
    pub original_url: String,
    pub artifact_id: Option<String>,
}

impl SimpleWebApplicationService {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            original_url: id.clone(),
            id,
            artifact_id: None,
        }
    }
}

crate::impl_object!(SimpleWebApplicationService);

/// SAML 1.1 relying party.
#[derive(Debug, Clone, PartialEq)]
pub struct SamlService {
    pub id: String,
    pub original_url: String,
    pub artifact_id: Option<String>,
    pub request_id: Option<String>,
}

crate::impl_object!(SamlService);

/// Any service a ticket can be issued for.
///
/// `Extension` carries service types registered by the caller (OpenID,
/// Google Accounts, ...); they round-trip through their own codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Service {
    Web(SimpleWebApplicationService),
    Saml(SamlService),
    Extension(Box<dyn Object>),
}

impl Service {
    pub fn id(&self) -> Option<&str> {
        match self {
            Service::Web(service) => Some(&service.id),
            Service::Saml(service) => Some(&service.id),
            Service::Extension(_) => None,
        }
    }

    pub fn as_object(&self) -> &dyn Object {
        match self {
            Service::Web(service) => service,
            Service::Saml(service) => service,
            Service::Extension(object) => &**object,
        }
    }

    pub fn from_object(object: Box<dyn Object>) -> Result<Self> {
        let any = object.as_any();
        if any.is::<SimpleWebApplicationService>() {
            downcast(object).map(Service::Web)
        } else if any.is::<SamlService>() {
            downcast(object).map(Service::Saml)
        } else {
            Ok(Service::Extension(object))
        }
    }
}

impl From<SimpleWebApplicationService> for Service {
    fn from(service: SimpleWebApplicationService) -> Self {
        Service::Web(service)
    }
}

impl From<SamlService> for Service {
    fn from(service: SamlService) -> Self {
        Service::Saml(service)
    }
}

impl FieldValue for Service {
    fn to_field(&self) -> FieldRef<'_> {
        FieldRef::Borrowed(self.as_object())
    }

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self> {
        Service::from_object(<Box<dyn Object> as FieldValue>::from_field(value)?)
    }
}

/// Granted services keyed by service ticket id, as a generic [`Map`].
pub(crate) fn services_to_map(services: &HashMap<String, Service>) -> Map {
    services
        .iter()
        .map(|(id, service)| (id.clone(), service.as_object().clone_object()))
        .collect()
}

pub(crate) fn services_from_map(map: Map) -> Result<HashMap<String, Service>> {
    map.into_iter()
        .map(|(id, object)| Ok((id, Service::from_object(object)?)))
        .collect()
}
