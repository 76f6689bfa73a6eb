//! Protocol Module
//!
//! Defines the packet envelope and its wire text format.
//!
//! ## Packet
//! ```text
//! ┌─────────────┬─────────────┬──────────────┬──────────────┐
//! │   Command   │   Payload   │  Packet ID   │  Author ID   │
//! │ "chat;text" │ 42 | "text" │ UUID         │ UUID | null  │
//! └─────────────┴─────────────┴──────────────┴──────────────┘
//! ```
//!
//! ## Wire Text (one line)
//! ```text
//! {"command":"chat;text;", "data":" hello", "packetID":"<uuid>", "authID":"<uuid>"}
//! ```
//!
//! ### Commands
//! - `{messageType};{dataType};{reserved...}`
//! - `SIMPLE_TEXT`: plain text message

mod command;
mod payload;
mod packet;
mod codec;

pub use command::{Command, SEGMENT_SEPARATOR, SIMPLE_TEXT};
pub use payload::Payload;
pub use packet::Packet;
pub use codec::{
    decode_packet, decode_packet_strict, encode_packet, encode_packet_strict, read_packet,
    write_packet, PacketCodec, FIELD_AUTHOR_ID, FIELD_COMMAND, FIELD_DATA, FIELD_PACKET_ID,
};
