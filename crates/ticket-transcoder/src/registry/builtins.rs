// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in registrations and their pinned descriptors.

use crate::codec::builtin::{
    BoolCodec, DateTimeCodec, F64Codec, I32Codec, I64Codec, ListCodec, MapCodec, StringCodec,
};
use crate::codec::ticket::{
    HardTimeoutExpirationPolicyCodec, ImmutableAuthenticationCodec,
    MultiTimeUseOrTimeoutExpirationPolicyCodec, MutableAuthenticationCodec, SamlServiceCodec, SimplePrincipalCodec,
    SimpleWebApplicationServiceCodec, TimeoutExpirationPolicyCodec,
};
use crate::model::{
    HardTimeoutExpirationPolicy, ImmutableAuthentication, MultiTimeUseOrTimeoutExpirationPolicy,
    MutableAuthentication, NeverExpiresExpirationPolicy, RememberMeDelegatingExpirationPolicy,
    SamlService, ServiceTicket, SimplePrincipal, SimpleWebApplicationService,
    ThrottledUseAndTimeoutExpirationPolicy, TicketGrantingTicket,
    TicketGrantingTicketExpirationPolicy, TimeoutExpirationPolicy,
};
use crate::object::{List, Map};

use super::{Registration, Registry, TypeDescriptor};

/// Fixed descriptors of the built-in types.
///
/// These values are written into every cached record; never renumber them.
pub mod descriptors {
    use super::TypeDescriptor;

    pub const BOOL: TypeDescriptor = TypeDescriptor::new(2);
    pub const I32: TypeDescriptor = TypeDescriptor::new(3);
    pub const I64: TypeDescriptor = TypeDescriptor::new(4);
    pub const F64: TypeDescriptor = TypeDescriptor::new(5);
    pub const STRING: TypeDescriptor = TypeDescriptor::new(6);
    pub const DATE_TIME: TypeDescriptor = TypeDescriptor::new(7);
    pub const LIST: TypeDescriptor = TypeDescriptor::new(8);
    pub const MAP: TypeDescriptor = TypeDescriptor::new(9);

    pub const SIMPLE_PRINCIPAL: TypeDescriptor = TypeDescriptor::new(16);
    pub const SIMPLE_WEB_APPLICATION_SERVICE: TypeDescriptor = TypeDescriptor::new(17);
    pub const SAML_SERVICE: TypeDescriptor = TypeDescriptor::new(18);
    pub const IMMUTABLE_AUTHENTICATION: TypeDescriptor = TypeDescriptor::new(19);
    pub const MUTABLE_AUTHENTICATION: TypeDescriptor = TypeDescriptor::new(20);

    pub const TIMEOUT_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(32);
    pub const HARD_TIMEOUT_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(33);
    pub const MULTI_TIME_USE_OR_TIMEOUT_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(34);
    pub const NEVER_EXPIRES_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(35);
    pub const REMEMBER_ME_DELEGATING_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(36);
    pub const THROTTLED_USE_AND_TIMEOUT_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(37);
    pub const TICKET_GRANTING_TICKET_EXPIRATION_POLICY: TypeDescriptor = TypeDescriptor::new(38);

    pub const TICKET_GRANTING_TICKET: TypeDescriptor = TypeDescriptor::new(48);
    pub const SERVICE_TICKET: TypeDescriptor = TypeDescriptor::new(49);
}

fn table() -> Vec<(TypeDescriptor, Registration)> {
    use descriptors as d;

    vec![
        (d::BOOL, Registration::new::<bool, _>(BoolCodec)),
        (d::I32, Registration::new::<i32, _>(I32Codec)),
        (d::I64, Registration::new::<i64, _>(I64Codec)),
        (d::F64, Registration::new::<f64, _>(F64Codec)),
        (d::STRING, Registration::new::<String, _>(StringCodec)),
        (
            d::DATE_TIME,
            Registration::new::<chrono::DateTime<chrono::Utc>, _>(DateTimeCodec),
        ),
        (d::LIST, Registration::new::<List, _>(ListCodec)),
        (d::MAP, Registration::new::<Map, _>(MapCodec)),
        (
            d::SIMPLE_PRINCIPAL,
            Registration::new::<SimplePrincipal, _>(SimplePrincipalCodec),
        ),
        (
            d::SIMPLE_WEB_APPLICATION_SERVICE,
            Registration::new::<SimpleWebApplicationService, _>(SimpleWebApplicationServiceCodec),
        ),
        (
            d::SAML_SERVICE,
            Registration::new::<SamlService, _>(SamlServiceCodec),
        ),
        (
            d::IMMUTABLE_AUTHENTICATION,
            Registration::new::<ImmutableAuthentication, _>(ImmutableAuthenticationCodec),
        ),
        (
            d::MUTABLE_AUTHENTICATION,
            Registration::new::<MutableAuthentication, _>(MutableAuthenticationCodec),
        ),
        (
            d::TIMEOUT_EXPIRATION_POLICY,
            Registration::new::<TimeoutExpirationPolicy, _>(TimeoutExpirationPolicyCodec),
        ),
        (
            d::HARD_TIMEOUT_EXPIRATION_POLICY,
            Registration::new::<HardTimeoutExpirationPolicy, _>(HardTimeoutExpirationPolicyCodec),
        ),
        (
            d::MULTI_TIME_USE_OR_TIMEOUT_EXPIRATION_POLICY,
            Registration::new::<MultiTimeUseOrTimeoutExpirationPolicy, _>(
                MultiTimeUseOrTimeoutExpirationPolicyCodec,
            ),
        ),
        (
            d::NEVER_EXPIRES_EXPIRATION_POLICY,
            Registration::record::<NeverExpiresExpirationPolicy>(),
        ),
        (
            d::REMEMBER_ME_DELEGATING_EXPIRATION_POLICY,
            Registration::record::<RememberMeDelegatingExpirationPolicy>(),
        ),
        (
            d::THROTTLED_USE_AND_TIMEOUT_EXPIRATION_POLICY,
            Registration::record::<ThrottledUseAndTimeoutExpirationPolicy>(),
        ),
        (
            d::TICKET_GRANTING_TICKET_EXPIRATION_POLICY,
            Registration::record::<TicketGrantingTicketExpirationPolicy>(),
        ),
        (
            d::TICKET_GRANTING_TICKET,
            Registration::record::<TicketGrantingTicket>(),
        ),
        (d::SERVICE_TICKET, Registration::record::<ServiceTicket>()),
    ]
}

/// Bind every built-in type. The table is static and collision-free, so
/// registration goes through the unchecked path.
pub(super) fn register_builtins(registry: &mut Registry) {
    for (descriptor, registration) in table() {
        registry.bind(descriptor, registration);
    }
}
