// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact binary transcoder for authentication tickets stored in memcached.
//!
//! Objects are written as a varint type descriptor followed by the bytes of
//! the codec registered for their type, recursively for nested objects, so a
//! record decodes without any out-of-band type hint.
//!
//! ```text
//! object -> Registry (type -> descriptor, codec) -> adaptive scratch buffer -> bytes
//! bytes  -> descriptor -> Registry (descriptor -> codec)               -> object
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use ticket_transcoder::model::{
//!     ImmutableAuthentication, SimplePrincipal, TicketGrantingTicket, TimeoutExpirationPolicy,
//! };
//! use ticket_transcoder::{Transcoder, TranscoderConfig};
//!
//! let transcoder = Transcoder::new(TranscoderConfig::default())?;
//!
//! let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
//! let principal = SimplePrincipal::new("jdoe").with_attribute("mail", String::from("jdoe@example.org"));
//! let tgt = TicketGrantingTicket::new(
//!     "TGT-1-abc",
//!     ImmutableAuthentication::new(principal, now),
//!     TimeoutExpirationPolicy { time_to_kill_in_ms: 7_200_000 },
//!     now,
//! );
//!
//! let bytes = transcoder.encode(&tgt)?;
//! assert!(transcoder.fits(bytes.len()));
//! let decoded: TicketGrantingTicket = transcoder.decode_as(&bytes)?;
//! assert_eq!(decoded, tgt);
//! # Ok::<(), ticket_transcoder::TranscodeError>(())
//! ```
//!
//! # Extension types
//!
//! Types outside the built-in set either get a hand-written [`Codec`] via
//! [`Registration::new`], or implement [`Record`] + [`FromRecord`] and use the
//! generic field codec. A registered extension declares its descriptor with
//! [`Registration::pinned`], conventionally from
//! [`registry::FIRST_EXTENSION_DESCRIPTOR`] up, and every process sharing the
//! cache must declare the same one. Under [`RegistryPolicy::FailOpen`] an
//! unregistered record still round-trips, keyed by its record name.

pub mod codec;
pub mod config;
mod error;
pub mod model;
pub mod object;
pub mod record;
pub mod registry;
pub mod ser;
mod transcoder;

pub use codec::{Codec, CodecKind, ObjectReader, ObjectWriter, RecordCodec};
pub use config::{TranscoderConfig, MAX_RECORD_SIZE};
pub use error::{Result, TranscodeError};
pub use object::{List, Map, Object};
pub use record::{Field, FieldRef, FieldValue, Fields, FromRecord, Record};
pub use registry::{CodecEntry, Registration, Registry, RegistryPolicy, TypeDescriptor};
pub use transcoder::{CacheTranscoder, CachedData, Transcoder, TranscoderBuilder};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
