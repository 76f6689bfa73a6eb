//! Packet definitions
//!
//! The envelope peers exchange: a command, a payload, the author's id and
//! the packet's own id.

use std::fmt;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use crate::error::Result;
use crate::id::{shorten_id, IdGenerator, RandomIdGenerator, NULL_ID};

use super::codec::{decode_packet, encode_packet};
use super::{Command, Payload};

/// A packet exchanged between peers
///
/// Packets are immutable. Equality and hashing use `packet_id` only: two
/// values with the same id are the same packet, whatever else they hold.
#[derive(Debug, Clone)]
pub struct Packet {
    /// How the receiver should treat `payload`
    command: Command,

    /// Data to be processed by the receiver
    payload: Payload,

    /// Sender, if known
    author_id: Option<Uuid>,

    /// Identity of this packet, preserved across the wire
    packet_id: Uuid,
}

impl Packet {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a packet with a fresh random id
    ///
    /// `command` may be a raw tag (`&str`, `String`) or a `Command`.
    pub fn new(
        command: impl Into<Command>,
        payload: impl Into<Payload>,
        author_id: Option<Uuid>,
    ) -> Self {
        Self::new_with(&RandomIdGenerator, command, payload, author_id)
    }

    /// Create a packet whose id comes from `ids`
    pub fn new_with(
        ids: &dyn IdGenerator,
        command: impl Into<Command>,
        payload: impl Into<Payload>,
        author_id: Option<Uuid>,
    ) -> Self {
        Self::from_parts(command.into(), payload.into(), author_id, ids.next_id())
    }

    /// Create a plain text message under the `SIMPLE_TEXT` command
    pub fn simple_text(message: impl Into<String>, author_id: Option<Uuid>) -> Self {
        Self::simple_text_with(&RandomIdGenerator, message, author_id)
    }

    /// `simple_text` with an injected id generator
    pub fn simple_text_with(
        ids: &dyn IdGenerator,
        message: impl Into<String>,
        author_id: Option<Uuid>,
    ) -> Self {
        Self::new_with(ids, Command::simple_text(), Payload::Text(message.into()), author_id)
    }

    /// Rebuild a packet with a known id (used by the decoder)
    pub(crate) fn from_parts(
        command: Command,
        payload: Payload,
        author_id: Option<Uuid>,
        packet_id: Uuid,
    ) -> Self {
        Self {
            command,
            payload,
            author_id,
            packet_id,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn author_id(&self) -> Option<Uuid> {
        self.author_id
    }

    pub fn packet_id(&self) -> Uuid {
        self.packet_id
    }

    /// Message type of the command, the routing key for dispatch
    pub fn packet_type(&self) -> &str {
        self.command.message_type()
    }

    /// Shortened author id, for logs
    pub fn short_author_id(&self) -> String {
        shorten_id(self.author_id)
    }

    /// Shortened packet id, for logs
    pub fn short_packet_id(&self) -> String {
        shorten_id(Some(self.packet_id))
    }

    // =========================================================================
    // Wire Text
    // =========================================================================

    /// Encode to compat wire text
    pub fn to_wire_text(&self) -> String {
        encode_packet(self)
    }

    /// Decode compat wire text, keeping the packet id it carries
    pub fn from_wire_text(text: &str) -> Result<Self> {
        decode_packet(text)
    }

    // =========================================================================
    // Display Strings
    // =========================================================================

    /// Compact form with shortened ids; this is also the `Display` output
    ///
    /// `Packet{PacketID: 0016d3cca427, DataType: Text, AuthID: null, Type: chat}`
    pub fn to_shortened_string(&self) -> String {
        format!(
            "Packet{{PacketID: {}, DataType: {}, AuthID: {}, Type: {}}}",
            self.short_packet_id(),
            self.payload.kind_name(),
            self.short_author_id(),
            self.command.type_string()
        )
    }

    /// Full form with complete ids, the raw tag and the payload
    pub fn to_long_string(&self) -> String {
        let author = match self.author_id {
            Some(id) => id.to_string(),
            None => NULL_ID.to_string(),
        };
        format!(
            "Packet{{PacketID: {}, Command: {}, Data: {}, AuthID: {}, Type: {}}}",
            self.packet_id,
            self.command.tag_string(),
            self.payload,
            author,
            self.command.type_string()
        )
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shortened_string())
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.packet_id == other.packet_id
    }
}

impl Eq for Packet {}

impl Hash for Packet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packet_id.hash(state);
    }
}
