// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact codecs for the hot ticket domain types.
//!
//! Attribute maps and authentication dates are written inline (no
//! descriptor) since their type is fixed; the principal goes through the
//! registry so a caller can swap its codec.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{
    HardTimeoutExpirationPolicy, ImmutableAuthentication, MultiTimeUseOrTimeoutExpirationPolicy,
    MutableAuthentication, SamlService, SimplePrincipal, SimpleWebApplicationService,
    TimeoutExpirationPolicy,
};
use crate::object::Map;

use super::builtin::{read_map_entries, read_timestamp, write_map_entries, write_timestamp};
use super::{Codec, ObjectReader, ObjectWriter};

pub struct SimplePrincipalCodec;

impl Codec<SimplePrincipal> for SimplePrincipalCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &SimplePrincipal) -> Result<()> {
        writer.write_str(&value.id)?;
        write_map_entries(writer, &value.attributes)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<SimplePrincipal> {
        Ok(SimplePrincipal {
            id: reader.read_string()?,
            attributes: read_map_entries(reader)?,
        })
    }
}

pub struct SimpleWebApplicationServiceCodec;

impl Codec<SimpleWebApplicationService> for SimpleWebApplicationServiceCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &SimpleWebApplicationService) -> Result<()> {
        writer.write_str(&value.id)?;
        writer.write_str(&value.original_url)?;
        writer.write_opt_str(value.artifact_id.as_deref())
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<SimpleWebApplicationService> {
        Ok(SimpleWebApplicationService {
            id: reader.read_string()?,
            original_url: reader.read_string()?,
            artifact_id: reader.read_opt_string()?,
        })
    }
}

pub struct SamlServiceCodec;

impl Codec<SamlService> for SamlServiceCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &SamlService) -> Result<()> {
        writer.write_str(&value.id)?;
        writer.write_str(&value.original_url)?;
        writer.write_opt_str(value.artifact_id.as_deref())?;
        writer.write_opt_str(value.request_id.as_deref())
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<SamlService> {
        Ok(SamlService {
            id: reader.read_string()?,
            original_url: reader.read_string()?,
            artifact_id: reader.read_opt_string()?,
            request_id: reader.read_opt_string()?,
        })
    }
}

fn write_authentication(
    writer: &mut ObjectWriter<'_>,
    principal: &SimplePrincipal,
    authenticated_date: &DateTime<Utc>,
    attributes: &Map,
) -> Result<()> {
    write_timestamp(writer, authenticated_date)?;
    write_map_entries(writer, attributes)?;
    writer.write_value(principal)
}

fn read_authentication(
    reader: &mut ObjectReader<'_>,
) -> Result<(SimplePrincipal, DateTime<Utc>, Map)> {
    let authenticated_date = read_timestamp(reader)?;
    let attributes = read_map_entries(reader)?;
    let principal = reader.read_value_as::<SimplePrincipal>()?;
    Ok((principal, authenticated_date, attributes))
}

pub struct ImmutableAuthenticationCodec;

impl Codec<ImmutableAuthentication> for ImmutableAuthenticationCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &ImmutableAuthentication) -> Result<()> {
        write_authentication(
            writer,
            &value.principal,
            &value.authenticated_date,
            &value.attributes,
        )
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<ImmutableAuthentication> {
        let (principal, authenticated_date, attributes) = read_authentication(reader)?;
        Ok(ImmutableAuthentication {
            principal,
            attributes,
            authenticated_date,
        })
    }
}

pub struct MutableAuthenticationCodec;

impl Codec<MutableAuthentication> for MutableAuthenticationCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &MutableAuthentication) -> Result<()> {
        write_authentication(
            writer,
            &value.principal,
            &value.authenticated_date,
            &value.attributes,
        )
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<MutableAuthentication> {
        let (principal, authenticated_date, attributes) = read_authentication(reader)?;
        Ok(MutableAuthentication {
            principal,
            attributes,
            authenticated_date,
        })
    }
}

pub struct TimeoutExpirationPolicyCodec;

impl Codec<TimeoutExpirationPolicy> for TimeoutExpirationPolicyCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &TimeoutExpirationPolicy) -> Result<()> {
        writer.write_i64(value.time_to_kill_in_ms)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<TimeoutExpirationPolicy> {
        Ok(TimeoutExpirationPolicy {
            time_to_kill_in_ms: reader.read_i64()?,
        })
    }
}

pub struct HardTimeoutExpirationPolicyCodec;

impl Codec<HardTimeoutExpirationPolicy> for HardTimeoutExpirationPolicyCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &HardTimeoutExpirationPolicy) -> Result<()> {
        writer.write_i64(value.time_to_kill_in_ms)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<HardTimeoutExpirationPolicy> {
        Ok(HardTimeoutExpirationPolicy {
            time_to_kill_in_ms: reader.read_i64()?,
        })
    }
}

pub struct MultiTimeUseOrTimeoutExpirationPolicyCodec;

impl Codec<MultiTimeUseOrTimeoutExpirationPolicy> for MultiTimeUseOrTimeoutExpirationPolicyCodec {
    fn write(
        &self,
        writer: &mut ObjectWriter<'_>,
        value: &MultiTimeUseOrTimeoutExpirationPolicy,
    ) -> Result<()> {
        writer.write_i32(value.number_of_uses)?;
        writer.write_i64(value.time_to_kill_in_ms)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<MultiTimeUseOrTimeoutExpirationPolicy> {
        Ok(MultiTimeUseOrTimeoutExpirationPolicy {
            number_of_uses: reader.read_i32()?,
            time_to_kill_in_ms: reader.read_i64()?,
        })
    }
}
