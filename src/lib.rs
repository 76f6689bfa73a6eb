//! # peerpacket
//!
//! The message envelope peers exchange, with:
//! - Semicolon-delimited command tags used as routing keys
//! - Number / text payloads
//! - Random 128-bit packet ids preserved across the wire
//! - A one-line quasi-JSON wire text codec, compatible with existing peers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Sender Application                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Packet::new / Packet::simple_text
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Packet (immutable)                         │
//! │      Command · Payload · author id · packet id               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ encode
//!                       ▼
//!              wire text (one line)  ──── transport (external)
//!                       │ decode (compat | strict)
//!                       ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Receiver Application                       │
//! │            routes on Command::message_type()                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod id;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DecodeError, PacketError, Result};
pub use config::{CodecConfig, WireDialect};
pub use id::{shorten_id, IdGenerator};
pub use protocol::{Command, Packet, PacketCodec, Payload};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of peerpacket
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
