// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::object::Map;
use crate::record::{Field, Fields, FromRecord, Record};

use super::service::{services_from_map, services_to_map};
use super::{Authentication, ExpirationPolicy, Service};

/// Single sign-on session ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketGrantingTicket {
    pub id: String,
    pub expiration_policy: ExpirationPolicy,
    pub creation_time: DateTime<Utc>,
    pub last_time_used: DateTime<Utc>,
    pub previous_last_time_used: DateTime<Utc>,
    pub count_of_uses: i32,
    /// Set for proxy-granting tickets.
    pub granting_ticket: Option<Box<TicketGrantingTicket>>,
    pub authentication: Authentication,
    pub expired: bool,
    /// Services granted from this ticket, keyed by service ticket id.
    pub services: HashMap<String, Service>,
}

impl TicketGrantingTicket {
    pub fn new(
        id: impl Into<String>,
        authentication: impl Into<Authentication>,
        expiration_policy: impl Into<ExpirationPolicy>,
        creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            expiration_policy: expiration_policy.into(),
            creation_time,
            last_time_used: creation_time,
            previous_last_time_used: creation_time,
            count_of_uses: 0,
            granting_ticket: None,
            authentication: authentication.into(),
            expired: false,
            services: HashMap::new(),
        }
    }

    /// Issue a service ticket and record the grant.
    pub fn grant_service_ticket(
        &mut self,
        id: impl Into<String>,
        service: impl Into<Service>,
        expiration_policy: impl Into<ExpirationPolicy>,
        now: DateTime<Utc>,
    ) -> ServiceTicket {
        let id = id.into();
        let service = service.into();
        self.previous_last_time_used = self.last_time_used;
        self.last_time_used = now;
        self.count_of_uses = self.count_of_uses.saturating_add(1);
        self.services.insert(id.clone(), service.clone());

        ServiceTicket {
            id,
            expiration_policy: expiration_policy.into(),
            creation_time: now,
            last_time_used: now,
            previous_last_time_used: now,
            count_of_uses: 0,
            from_new_login: self.count_of_uses == 1,
            granted_ticket_already: false,
            service,
            granting_ticket: Box::new(self.clone()),
        }
    }
}

impl Record for TicketGrantingTicket {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("id", &self.id),
            Field::new("expiration_policy", &self.expiration_policy),
            Field::new("creation_time", &self.creation_time),
            Field::new("last_time_used", &self.last_time_used),
            Field::new("previous_last_time_used", &self.previous_last_time_used),
            Field::new("count_of_uses", &self.count_of_uses),
            Field::new("granting_ticket", &self.granting_ticket),
            Field::new("authentication", &self.authentication),
            Field::new("expired", &self.expired),
            Field::owned("services", Box::new(services_to_map(&self.services))),
        ]
    }
}

impl FromRecord for TicketGrantingTicket {
    const RECORD_NAME: &'static str = "TicketGrantingTicket";

    fn from_fields(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            expiration_policy: fields.take("expiration_policy")?,
            creation_time: fields.take("creation_time")?,
            last_time_used: fields.take("last_time_used")?,
            previous_last_time_used: fields.take("previous_last_time_used")?,
            count_of_uses: fields.take("count_of_uses")?,
            granting_ticket: fields.take("granting_ticket")?,
            authentication: fields.take("authentication")?,
            expired: fields.take("expired")?,
            services: services_from_map(fields.take::<Map>("services")?)?,
        })
    }
}

crate::impl_object!(TicketGrantingTicket, record);

/// One-time ticket validating access to a single service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceTicket {
    pub id: String,
    pub expiration_policy: ExpirationPolicy,
    pub creation_time: DateTime<Utc>,
    pub last_time_used: DateTime<Utc>,
    pub previous_last_time_used: DateTime<Utc>,
    pub count_of_uses: i32,
    pub granting_ticket: Box<TicketGrantingTicket>,
    pub service: Service,
    pub from_new_login: bool,
    pub granted_ticket_already: bool,
}

impl Record for ServiceTicket {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("id", &self.id),
            Field::new("expiration_policy", &self.expiration_policy),
            Field::new("creation_time", &self.creation_time),
            Field::new("last_time_used", &self.last_time_used),
            Field::new("previous_last_time_used", &self.previous_last_time_used),
            Field::new("count_of_uses", &self.count_of_uses),
            Field::new("granting_ticket", &self.granting_ticket),
            Field::new("service", &self.service),
            Field::new("from_new_login", &self.from_new_login),
            Field::new("granted_ticket_already", &self.granted_ticket_already),
        ]
    }
}

impl FromRecord for ServiceTicket {
    const RECORD_NAME: &'static str = "ServiceTicket";

    fn from_fields(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            expiration_policy: fields.take("expiration_policy")?,
            creation_time: fields.take("creation_time")?,
            last_time_used: fields.take("last_time_used")?,
            previous_last_time_used: fields.take("previous_last_time_used")?,
            count_of_uses: fields.take("count_of_uses")?,
            granting_ticket: fields.take("granting_ticket")?,
            service: fields.take("service")?,
            from_new_login: fields.take("from_new_login")?,
            granted_ticket_already: fields.take("granted_ticket_already")?,
        })
    }
}

crate::impl_object!(ServiceTicket, record);
