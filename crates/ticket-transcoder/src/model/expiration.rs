// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ticket expiration policies.
//!
//! The first three have compact hand-written codecs; the rest go through
//! the generic field codec.

use crate::error::{Result, TranscodeError};
use crate::object::{downcast, Object};
use crate::record::{Field, FieldRef, FieldValue, Fields, FromRecord, Record};

/// Expires after a period of inactivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutExpirationPolicy {
    pub time_to_kill_in_ms: i64,
}

crate::impl_object!(TimeoutExpirationPolicy);

/// Expires a fixed time after creation, regardless of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardTimeoutExpirationPolicy {
    pub time_to_kill_in_ms: i64,
}

crate::impl_object!(HardTimeoutExpirationPolicy);

/// Expires after a number of uses or a period of inactivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiTimeUseOrTimeoutExpirationPolicy {
    pub number_of_uses: i32,
    pub time_to_kill_in_ms: i64,
}

crate::impl_object!(MultiTimeUseOrTimeoutExpirationPolicy);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeverExpiresExpirationPolicy;

impl Record for NeverExpiresExpirationPolicy {
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }
}

impl FromRecord for NeverExpiresExpirationPolicy {
    const RECORD_NAME: &'static str = "NeverExpiresExpirationPolicy";

    fn from_fields(_fields: &mut Fields) -> Result<Self> {
        Ok(NeverExpiresExpirationPolicy)
    }
}

crate::impl_object!(NeverExpiresExpirationPolicy, record);

/// Picks one of two policies depending on whether remember-me was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct RememberMeDelegatingExpirationPolicy {
    pub remember_me_expiration_policy: Box<ExpirationPolicy>,
    pub session_expiration_policy: Box<ExpirationPolicy>,
}

impl Record for RememberMeDelegatingExpirationPolicy {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(
                "remember_me_expiration_policy",
                &self.remember_me_expiration_policy,
            ),
            Field::new("session_expiration_policy", &self.session_expiration_policy),
        ]
    }
}

impl FromRecord for RememberMeDelegatingExpirationPolicy {
    const RECORD_NAME: &'static str = "RememberMeDelegatingExpirationPolicy";

    fn from_fields(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            remember_me_expiration_policy: fields.take("remember_me_expiration_policy")?,
            session_expiration_policy: fields.take("session_expiration_policy")?,
        })
    }
}

crate::impl_object!(RememberMeDelegatingExpirationPolicy, record);

/// Timeout policy that also rejects uses closer together than a minimum gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottledUseAndTimeoutExpirationPolicy {
    pub time_to_kill_in_ms: i64,
    pub time_in_between_uses_in_ms: i64,
}

impl Record for ThrottledUseAndTimeoutExpirationPolicy {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("time_to_kill_in_ms", &self.time_to_kill_in_ms),
            Field::new(
                "time_in_between_uses_in_ms",
                &self.time_in_between_uses_in_ms,
            ),
        ]
    }
}

impl FromRecord for ThrottledUseAndTimeoutExpirationPolicy {
    const RECORD_NAME: &'static str = "ThrottledUseAndTimeoutExpirationPolicy";

    fn from_fields(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            time_to_kill_in_ms: fields.take("time_to_kill_in_ms")?,
            time_in_between_uses_in_ms: fields.take("time_in_between_uses_in_ms")?,
        })
    }
}

crate::impl_object!(ThrottledUseAndTimeoutExpirationPolicy, record);

/// Sliding inactivity timeout bounded by a maximum lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketGrantingTicketExpirationPolicy {
    pub max_time_to_live_in_ms: i64,
    pub time_to_kill_in_ms: i64,
}

impl Record for TicketGrantingTicketExpirationPolicy {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("max_time_to_live_in_ms", &self.max_time_to_live_in_ms),
            Field::new("time_to_kill_in_ms", &self.time_to_kill_in_ms),
        ]
    }
}

impl FromRecord for TicketGrantingTicketExpirationPolicy {
    const RECORD_NAME: &'static str = "TicketGrantingTicketExpirationPolicy";

    fn from_fields(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            max_time_to_live_in_ms: fields.take("max_time_to_live_in_ms")?,
            time_to_kill_in_ms: fields.take("time_to_kill_in_ms")?,
        })
    }
}

crate::impl_object!(TicketGrantingTicketExpirationPolicy, record);

/// Any expiration policy a ticket can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpirationPolicy {
    Timeout(TimeoutExpirationPolicy),
    HardTimeout(HardTimeoutExpirationPolicy),
    MultiTimeUseOrTimeout(MultiTimeUseOrTimeoutExpirationPolicy),
    NeverExpires(NeverExpiresExpirationPolicy),
    RememberMeDelegating(RememberMeDelegatingExpirationPolicy),
    ThrottledUseAndTimeout(ThrottledUseAndTimeoutExpirationPolicy),
    TicketGrantingTicket(TicketGrantingTicketExpirationPolicy),
}

impl ExpirationPolicy {
    pub fn as_object(&self) -> &dyn Object {
        match self {
            ExpirationPolicy::Timeout(policy) => policy,
            ExpirationPolicy::HardTimeout(policy) => policy,
            ExpirationPolicy::MultiTimeUseOrTimeout(policy) => policy,
            ExpirationPolicy::NeverExpires(policy) => policy,
            ExpirationPolicy::RememberMeDelegating(policy) => policy,
            ExpirationPolicy::ThrottledUseAndTimeout(policy) => policy,
            ExpirationPolicy::TicketGrantingTicket(policy) => policy,
        }
    }

    pub fn from_object(object: Box<dyn Object>) -> Result<Self> {
        let any = object.as_any();
        if any.is::<TimeoutExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::Timeout)
        } else if any.is::<HardTimeoutExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::HardTimeout)
        } else if any.is::<MultiTimeUseOrTimeoutExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::MultiTimeUseOrTimeout)
        } else if any.is::<NeverExpiresExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::NeverExpires)
        } else if any.is::<RememberMeDelegatingExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::RememberMeDelegating)
        } else if any.is::<ThrottledUseAndTimeoutExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::ThrottledUseAndTimeout)
        } else if any.is::<TicketGrantingTicketExpirationPolicy>() {
            downcast(object).map(ExpirationPolicy::TicketGrantingTicket)
        } else {
            Err(TranscodeError::TypeMismatch {
                expected: "ExpirationPolicy",
                found: object.type_name(),
            })
        }
    }
}

impl FieldValue for ExpirationPolicy {
    fn to_field(&self) -> FieldRef<'_> {
        FieldRef::Borrowed(self.as_object())
    }

    fn from_field(value: Option<Box<dyn Object>>) -> Result<Self> {
        ExpirationPolicy::from_object(<Box<dyn Object> as FieldValue>::from_field(value)?)
    }
}

impl From<TimeoutExpirationPolicy> for ExpirationPolicy {
    fn from(policy: TimeoutExpirationPolicy) -> Self {
        ExpirationPolicy::Timeout(policy)
    }
}

impl From<HardTimeoutExpirationPolicy> for ExpirationPolicy {
    fn from(policy: HardTimeoutExpirationPolicy) -> Self {
        ExpirationPolicy::HardTimeout(policy)
    }
}

impl From<MultiTimeUseOrTimeoutExpirationPolicy> for ExpirationPolicy {
    fn from(policy: MultiTimeUseOrTimeoutExpirationPolicy) -> Self {
        ExpirationPolicy::MultiTimeUseOrTimeout(policy)
    }
}

impl From<NeverExpiresExpirationPolicy> for ExpirationPolicy {
    fn from(policy: NeverExpiresExpirationPolicy) -> Self {
        ExpirationPolicy::NeverExpires(policy)
    }
}

impl From<RememberMeDelegatingExpirationPolicy> for ExpirationPolicy {
    fn from(policy: RememberMeDelegatingExpirationPolicy) -> Self {
        ExpirationPolicy::RememberMeDelegating(policy)
    }
}

impl From<ThrottledUseAndTimeoutExpirationPolicy> for ExpirationPolicy {
    fn from(policy: ThrottledUseAndTimeoutExpirationPolicy) -> Self {
        ExpirationPolicy::ThrottledUseAndTimeout(policy)
    }
}

impl From<TicketGrantingTicketExpirationPolicy> for ExpirationPolicy {
    fn from(policy: TicketGrantingTicketExpirationPolicy) -> Self {
        ExpirationPolicy::TicketGrantingTicket(policy)
    }
}
