// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transcoder configuration.
//!
//! With the `config-loaders` feature (on by default) a
//! [`TranscoderConfig`] can be read from YAML:
//!
//! ```yaml
//! initial_buffer_size: 16384
//! max_buffer_size: 33554432   # or null for unbounded growth
//! policy: fail_closed
//! ```

use crate::error::{Result, TranscodeError};
use crate::registry::RegistryPolicy;

/// Initial scratch buffer size (bytes).
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 8192;

/// Default encode ceiling (bytes).
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Largest item the downstream memcached client accepts (bytes).
pub const MAX_RECORD_SIZE: usize = 20 * 1024 * 1024;

/// Maximum depth of nested objects, on both encode and decode.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Transcoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config-loaders",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct TranscoderConfig {
    /// Capacity of the first scratch buffer; retries use multiples of it
    pub initial_buffer_size: usize,

    /// Largest scratch buffer an encode may allocate (`None` = unbounded)
    pub max_buffer_size: Option<usize>,

    /// Advisory record size limit reported to callers
    pub max_record_size: usize,

    /// Behavior for types without a registration
    pub policy: RegistryPolicy,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_buffer_size: Some(DEFAULT_MAX_BUFFER_SIZE),
            max_record_size: MAX_RECORD_SIZE,
            policy: RegistryPolicy::default(),
        }
    }
}

impl TranscoderConfig {
    /// Reject configurations the encoder cannot make progress with.
    pub fn validate(&self) -> Result<()> {
        if self.initial_buffer_size == 0 {
            return Err(TranscodeError::Config(
                "initial_buffer_size must be greater than 0".into(),
            ));
        }
        if let Some(max) = self.max_buffer_size {
            if max < self.initial_buffer_size {
                return Err(TranscodeError::Config(format!(
                    "max_buffer_size ({}) is smaller than initial_buffer_size ({})",
                    max, self.initial_buffer_size
                )));
            }
        }
        if self.max_record_size == 0 {
            return Err(TranscodeError::Config(
                "max_record_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| TranscodeError::Config(format!("YAML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            TranscodeError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("[TranscoderConfig] loading {}", path.display());
        Self::from_yaml_str(&yaml)
    }
}
