// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Adaptive buffer encoder, envelope decoder and cache boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::codec::{ObjectReader, ObjectWriter};
use crate::config::TranscoderConfig;
use crate::error::{Result, TranscodeError};
use crate::object::{downcast, Object};
use crate::registry::{Registration, Registry, RegistryPolicy};
use crate::ser::ScratchBuffer;

/// Encodes objects to cache records and back.
///
/// `Send + Sync`: one instance serves every thread. Each encode owns its
/// scratch buffer and the registry is read-only.
#[derive(Debug)]
pub struct Transcoder {
    registry: Arc<Registry>,
    config: TranscoderConfig,
    retries: AtomicU64,
}

impl Transcoder {
    /// Transcoder over the built-in registry.
    pub fn new(config: TranscoderConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> TranscoderBuilder {
        TranscoderBuilder::default()
    }

    /// Transcoder over a prepared registry. The registry's policy replaces
    /// `config.policy`.
    pub fn with_registry(registry: Arc<Registry>, mut config: TranscoderConfig) -> Result<Self> {
        config.validate()?;
        config.policy = registry.policy();
        Ok(Self {
            registry,
            config,
            retries: AtomicU64::new(0),
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Encode `value` as descriptor + codec bytes.
    ///
    /// Starts with `initial_buffer_size` bytes and retries with
    /// `initial_buffer_size * n` on exhaustion. Growth stops at
    /// `max_buffer_size` with [`TranscodeError::ObjectTooLarge`]; the result
    /// is not checked against [`max_record_size`](Self::max_record_size).
    pub fn encode(&self, value: &dyn Object) -> Result<Vec<u8>> {
        let initial = self.config.initial_buffer_size;
        let ceiling = self.config.max_buffer_size;
        let mut multiplier = 1usize;

        loop {
            let wanted = initial.saturating_mul(multiplier);
            let capacity = ceiling.map_or(wanted, |limit| wanted.min(limit));
            let mut scratch = ScratchBuffer::allocate(capacity)?;

            let attempt = {
                let mut writer = ObjectWriter::new(&self.registry, scratch.cursor());
                writer.write_value(value).map(|()| writer.offset())
            };

            match attempt {
                Ok(written) => return Ok(scratch.into_written(written)),
                Err(TranscodeError::BufferExhausted { .. }) => {
                    if let Some(limit) = ceiling.filter(|limit| capacity >= *limit) {
                        log::warn!(
                            "[Transcoder] {} does not fit in {} bytes, giving up",
                            value.type_name(),
                            limit
                        );
                        return Err(TranscodeError::ObjectTooLarge { limit });
                    }
                    multiplier += 1;
                    self.retries.fetch_add(1, Ordering::Relaxed);
                    log::warn!(
                        "[Transcoder] buffer overflow while encoding {} ({} bytes), retrying with {} bytes",
                        value.type_name(),
                        capacity,
                        initial.saturating_mul(multiplier)
                    );
                    log::debug!("[Transcoder] overflowing value: {:?}", value);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Decode one record. Bytes left after the top-level object are an error.
    pub fn decode(&self, bytes: &[u8]) -> Result<Box<dyn Object>> {
        let mut reader = ObjectReader::new(&self.registry, bytes);
        let value = reader.read_value()?;
        if !reader.is_eof() {
            return Err(TranscodeError::Malformed(format!(
                "{} trailing bytes after {}",
                reader.remaining(),
                value.type_name()
            )));
        }
        Ok(value)
    }

    /// Decode and downcast to `T`.
    pub fn decode_as<T: Object>(&self, bytes: &[u8]) -> Result<T> {
        downcast(self.decode(bytes)?)
    }

    /// Largest record the downstream cache accepts.
    pub fn max_record_size(&self) -> usize {
        self.config.max_record_size
    }

    /// Whether an encoded record of `len` bytes can be stored.
    pub fn fits(&self, len: usize) -> bool {
        len <= self.config.max_record_size
    }

    /// Buffer-growth retries since construction, for tuning
    /// `initial_buffer_size`.
    pub fn retries(&self) -> u64 {
        self.retries.load(Ordering::Relaxed)
    }
}

/// Builder for [`Transcoder`]
#[derive(Debug)]
pub struct TranscoderBuilder {
    config: TranscoderConfig,
    registrations: Vec<Registration>,
    builtins: bool,
}

impl Default for TranscoderBuilder {
    fn default() -> Self {
        Self {
            config: TranscoderConfig::default(),
            registrations: Vec::new(),
            builtins: true,
        }
    }
}

impl TranscoderBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: TranscoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the first scratch buffer size (bytes)
    pub fn initial_buffer_size(mut self, size: usize) -> Self {
        self.config.initial_buffer_size = size;
        self
    }

    /// Set the encode ceiling (`None` = unbounded)
    pub fn max_buffer_size(mut self, size: Option<usize>) -> Self {
        self.config.max_buffer_size = size;
        self
    }

    /// Set the advisory record size limit
    pub fn max_record_size(mut self, size: usize) -> Self {
        self.config.max_record_size = size;
        self
    }

    pub fn policy(mut self, policy: RegistryPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Add a caller registration; applied after the built-ins, in order.
    ///
    /// New types must be [`pinned`](Registration::pinned); `build` fails with
    /// [`TranscodeError::UndeclaredDescriptor`] otherwise.
    pub fn register(mut self, registration: Registration) -> Self {
        self.registrations.push(registration);
        self
    }

    pub fn register_all<I>(mut self, registrations: I) -> Self
    where
        I: IntoIterator<Item = Registration>,
    {
        self.registrations.extend(registrations);
        self
    }

    /// Start from an empty registry.
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    pub fn build(self) -> Result<Transcoder> {
        self.config.validate()?;
        let mut registry = if self.builtins {
            Registry::with_builtins(self.config.policy)
        } else {
            Registry::new(self.config.policy)
        };
        registry.extend(self.registrations)?;
        Transcoder::with_registry(Arc::new(registry), self.config)
    }
}

/// A value as stored in memcached: flags word plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedData {
    pub flags: u32,
    pub data: Vec<u8>,
}

impl CachedData {
    /// Fails with [`TranscodeError::ObjectTooLarge`] if `data` exceeds `max_size`.
    pub fn new(flags: u32, data: Vec<u8>, max_size: usize) -> Result<Self> {
        if data.len() > max_size {
            return Err(TranscodeError::ObjectTooLarge { limit: max_size });
        }
        Ok(Self { flags, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Contract between a memcached client and its value transcoder.
pub trait CacheTranscoder: Send + Sync {
    fn to_cached(&self, value: &dyn Object) -> Result<CachedData>;

    fn from_cached(&self, data: &CachedData) -> Result<Box<dyn Object>>;

    /// Largest payload the client may store.
    fn max_size(&self) -> usize;

    /// Whether decoding should be moved off the I/O thread.
    fn async_decode(&self, _data: &CachedData) -> bool {
        false
    }
}

impl CacheTranscoder for Transcoder {
    fn to_cached(&self, value: &dyn Object) -> Result<CachedData> {
        CachedData::new(0, self.encode(value)?, self.max_record_size())
    }

    fn from_cached(&self, data: &CachedData) -> Result<Box<dyn Object>> {
        self.decode(&data.data)
    }

    fn max_size(&self) -> usize {
        self.max_record_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_RECORD_SIZE;
    use crate::model::SimplePrincipal;
    use crate::object::List;

    fn principal_with(attributes: usize) -> SimplePrincipal {
        (0..attributes).fold(SimplePrincipal::new("jdoe"), |p, i| {
            p.with_attribute(format!("attr{:03}", i), format!("value-{}", i))
        })
    }

    #[test]
    fn test_encode_grows_buffer_and_counts_retries() {
        let small = Transcoder::builder()
            .initial_buffer_size(16)
            .build()
            .expect("transcoder");
        let large = Transcoder::builder()
            .initial_buffer_size(64 * 1024)
            .build()
            .expect("transcoder");
        let principal = principal_with(20);

        let grown = small.encode(&principal).expect("encode");
        assert!(small.retries() > 0);
        assert_eq!(grown, large.encode(&principal).expect("encode"));
        assert_eq!(large.retries(), 0);
        assert_eq!(small.decode_as::<SimplePrincipal>(&grown).expect("decode"), principal);
    }

    #[test]
    fn test_encode_ceiling() {
        let transcoder = Transcoder::builder()
            .initial_buffer_size(8)
            .max_buffer_size(Some(20))
            .build()
            .expect("transcoder");

        // 8 -> 16 -> clamped 20 -> give up
        let err = transcoder.encode(&principal_with(5)).unwrap_err();
        assert!(matches!(err, TranscodeError::ObjectTooLarge { limit: 20 }));
        assert_eq!(transcoder.retries(), 2);

        // Exactly at the ceiling still succeeds.
        let fits = "x".repeat(17);
        let bytes = transcoder.encode(&fits).expect("encode");
        assert_eq!(bytes.len(), 19);
    }

    #[test]
    fn test_non_capacity_errors_are_not_retried() {
        let transcoder = Transcoder::builder()
            .initial_buffer_size(8)
            .policy(RegistryPolicy::FailClosed)
            .without_builtins()
            .build()
            .expect("transcoder");
        let err = transcoder.encode(&String::from("abc")).unwrap_err();
        assert!(matches!(err, TranscodeError::UnregisteredType { .. }));
        assert_eq!(transcoder.retries(), 0);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes_and_wrong_type() {
        let transcoder = Transcoder::new(TranscoderConfig::default()).expect("transcoder");
        let mut bytes = transcoder.encode(&42i64).expect("encode");
        assert!(matches!(
            transcoder.decode_as::<String>(&bytes),
            Err(TranscodeError::TypeMismatch { .. })
        ));
        bytes.push(0);
        assert!(matches!(transcoder.decode(&bytes), Err(TranscodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_empty_is_truncated() {
        let transcoder = Transcoder::new(TranscoderConfig::default()).expect("transcoder");
        assert!(matches!(
            transcoder.decode(&[]),
            Err(TranscodeError::TruncatedRecord { offset: 0, .. })
        ));
    }

    #[test]
    fn test_size_guard_is_advisory() {
        let transcoder = Transcoder::builder()
            .max_record_size(4)
            .build()
            .expect("transcoder");
        assert_eq!(transcoder.max_record_size(), 4);
        assert!(transcoder.fits(4));
        assert!(!transcoder.fits(5));

        // encode itself does not enforce the limit
        let bytes = transcoder.encode(&String::from("longer than four")).expect("encode");
        assert!(!transcoder.fits(bytes.len()));

        let default = Transcoder::new(TranscoderConfig::default()).expect("transcoder");
        assert_eq!(default.max_size(), MAX_RECORD_SIZE);
    }

    #[test]
    fn test_cache_transcoder_contract() {
        let transcoder = Transcoder::new(TranscoderConfig::default()).expect("transcoder");
        let list: List = vec![Box::new(1i32) as Box<dyn Object>, Box::new(String::from("two"))];

        let cached = transcoder.to_cached(&list).expect("to_cached");
        assert_eq!(cached.flags, 0);
        assert!(!transcoder.async_decode(&cached));
        let decoded = transcoder.from_cached(&cached).expect("from_cached");
        assert!(decoded.eq_object(&list));

        let small = Transcoder::builder().max_record_size(2).build().expect("transcoder");
        assert!(matches!(
            small.to_cached(&list),
            Err(TranscodeError::ObjectTooLarge { limit: 2 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Transcoder::builder().initial_buffer_size(0).build().unwrap_err();
        assert!(matches!(err, TranscodeError::Config(_)));
    }
}
