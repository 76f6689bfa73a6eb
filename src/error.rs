//! Error types for peerpacket
//!
//! Provides a unified error type for all operations, plus the typed
//! decode error surfaced when wire text cannot be turned into a packet.

use thiserror::Error;

/// Result type alias using PacketError
pub type Result<T> = std::result::Result<T, PacketError>;

/// Unified error type for peerpacket operations
#[derive(Debug, Error)]
pub enum PacketError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Framing error: {0}")]
    Framing(String),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons a piece of wire text could not be decoded into a packet
///
/// Absent identifiers written as `null` are not errors; they decode to
/// `None`. Only the packet id is required to be a real identifier.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The field name does not occur in the text, or its value would start
    /// past the end of the text.
    #[error("field `{field}` not found")]
    FieldNotFound { field: &'static str },

    /// No closing quote after the start of the field's value.
    #[error("value of field `{field}` is not terminated")]
    UnterminatedValue { field: &'static str },

    #[error("field `{field}` holds an invalid identifier {value:?}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// The packet id was written as `null`.
    #[error("packet id is null")]
    NullPacketId,

    #[error("field `{field}` appears more than once")]
    DuplicateField { field: &'static str },

    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
}

impl DecodeError {
    /// The wire field this error is about, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::FieldNotFound { field }
            | DecodeError::UnterminatedValue { field }
            | DecodeError::InvalidIdentifier { field, .. }
            | DecodeError::DuplicateField { field } => Some(field),
            DecodeError::NullPacketId => Some("packetID"),
            DecodeError::Syntax { .. } => None,
        }
    }
}
