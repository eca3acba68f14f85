// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ticket domain types with built-in registrations.
//!
//! Closed families (services, authentications, expiration policies) are
//! enums over their concrete types. On the wire each variant is the
//! concrete object with its own descriptor; `from_object` maps a decoded
//! object back onto the enum.

mod authentication;
mod expiration;
mod principal;
mod service;
mod ticket;

pub use authentication::{Authentication, ImmutableAuthentication, MutableAuthentication};
pub use expiration::{
    ExpirationPolicy, HardTimeoutExpirationPolicy, MultiTimeUseOrTimeoutExpirationPolicy,
    NeverExpiresExpirationPolicy, RememberMeDelegatingExpirationPolicy,
    ThrottledUseAndTimeoutExpirationPolicy, TicketGrantingTicketExpirationPolicy,
    TimeoutExpirationPolicy,
};
pub use principal::SimplePrincipal;
pub use service::{SamlService, Service, SimpleWebApplicationService};
pub use ticket::{ServiceTicket, TicketGrantingTicket};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranscodeError;
    use crate::object::Object;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_family_from_object() {
        let policy: Box<dyn Object> = Box::new(NeverExpiresExpirationPolicy);
        assert_eq!(
            ExpirationPolicy::from_object(policy).expect("policy"),
            ExpirationPolicy::NeverExpires(NeverExpiresExpirationPolicy)
        );

        let wrong: Box<dyn Object> = Box::new(String::from("not a policy"));
        assert!(matches!(
            ExpirationPolicy::from_object(wrong),
            Err(TranscodeError::TypeMismatch { expected: "ExpirationPolicy", .. })
        ));
    }

    #[test]
    fn test_unknown_service_becomes_extension() {
        let custom: Box<dyn Object> = Box::new(String::from("https://openid.example.org"));
        match Service::from_object(custom).expect("service") {
            Service::Extension(object) => assert_eq!(object.type_name(), std::any::type_name::<String>()),
            other => panic!("unexpected {:?}", other),
        }

        let web: Box<dyn Object> = Box::new(SimpleWebApplicationService::new("https://app"));
        assert!(matches!(Service::from_object(web), Ok(Service::Web(_))));
    }

    #[test]
    fn test_grant_service_ticket_updates_parent() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).single().expect("t0");
        let t1 = Utc.timestamp_opt(1_700_000_060, 0).single().expect("t1");
        let auth = ImmutableAuthentication::new(SimplePrincipal::new("jdoe"), t0);
        let mut tgt = TicketGrantingTicket::new(
            "TGT-1",
            auth,
            TimeoutExpirationPolicy {
                time_to_kill_in_ms: 7_200_000,
            },
            t0,
        );

        let st = tgt.grant_service_ticket(
            "ST-1",
            SimpleWebApplicationService::new("https://app"),
            MultiTimeUseOrTimeoutExpirationPolicy {
                number_of_uses: 1,
                time_to_kill_in_ms: 10_000,
            },
            t1,
        );

        assert!(st.from_new_login);
        assert_eq!(tgt.count_of_uses, 1);
        assert_eq!(tgt.last_time_used, t1);
        assert_eq!(tgt.previous_last_time_used, t0);
        assert_eq!(tgt.services.get("ST-1").and_then(Service::id), Some("https://app"));
        assert_eq!(st.granting_ticket.id, "TGT-1");
    }
}
