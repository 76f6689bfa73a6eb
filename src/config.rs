//! Configuration for the packet codec
//!
//! Centralized configuration with sensible defaults.

use crate::error::{PacketError, Result};

/// Default upper bound on a single line of wire text (64 KiB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Which decoder reads wire text
///
/// Both dialects share one text schema. They differ in how the decoder
/// finds field values and in whether the encoder escapes reserved
/// characters inside values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireDialect {
    /// Field-name seek plus quote scan, byte-compatible with existing peers.
    /// Values must not contain `"` or the name of another field.
    #[default]
    Compat,

    /// Single-pass tokenizer. Field order is free and values are escaped.
    Strict,
}

/// Main configuration for a codec instance
#[derive(Debug, Clone)]
pub struct CodecConfig {
    // -------------------------------------------------------------------------
    // Format Configuration
    // -------------------------------------------------------------------------
    /// Dialect used for both encoding and decoding
    pub dialect: WireDialect,

    // -------------------------------------------------------------------------
    // Stream Configuration
    // -------------------------------------------------------------------------
    /// Max size of one line of wire text, excluding the line terminator
    pub max_message_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            dialect: WireDialect::Compat,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Check the config for values the codec cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_message_size == 0 {
            return Err(PacketError::Config(
                "max_message_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the wire dialect
    pub fn dialect(mut self, dialect: WireDialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    /// Set the maximum size of one line of wire text (in bytes)
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}
