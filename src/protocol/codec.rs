//! Protocol codec
//!
//! Encoding and decoding functions for the wire text format.
//!
//! ## Wire Format
//!
//! One line of quasi-JSON with four string fields in a fixed order:
//! ```text
//! {"command":"<tag>", "data":" <payload>", "packetID":"<id>", "authID":"<id|null>"}
//!                             ^
//!                             leading space, part of the template
//! ```
//!
//! ## Decoding
//! - Compat: for each field, find the first occurrence of its name, skip
//!   the name plus three characters, read up to the next `"`. Field order
//!   does not matter, but a value that contains a field name or a quote
//!   breaks extraction. Existing peers depend on this exact behavior.
//! - Strict: a forward tokenizer reading `"key":"value"` pairs. Values are
//!   escaped on encode (`\\`, `\"`, `\n`, `\r`, `\t`), so any text
//!   survives. Without reserved characters both dialects produce the same
//!   bytes.
//!
//! ## Stream Framing
//! Packets are written one per line. A compat encoding that contains a
//! line break cannot be framed and is rejected by `write_packet`.

use std::borrow::Cow;
use std::io::{BufRead, Read, Write};

use uuid::Uuid;

use crate::config::{CodecConfig, WireDialect};
use crate::error::{DecodeError, PacketError, Result};
use crate::id::NULL_ID;

use super::{Command, Packet, Payload};

/// Wire field holding the command tag
pub const FIELD_COMMAND: &str = "command";

/// Wire field holding the payload
pub const FIELD_DATA: &str = "data";

/// Wire field holding the packet id
pub const FIELD_PACKET_ID: &str = "packetID";

/// Wire field holding the author id
pub const FIELD_AUTHOR_ID: &str = "authID";

/// Characters between the end of a field name and its value: `":"`
const VALUE_OFFSET: usize = 3;

/// Decode result before it is widened into `PacketError`
type DecodeResult<T> = std::result::Result<T, DecodeError>;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a packet to compat wire text. Never fails.
pub fn encode_packet(packet: &Packet) -> String {
    encode_with(packet, WireDialect::Compat)
}

/// Encode a packet with reserved characters escaped
pub fn encode_packet_strict(packet: &Packet) -> String {
    encode_with(packet, WireDialect::Strict)
}

fn encode_with(packet: &Packet, dialect: WireDialect) -> String {
    let payload = packet.payload().to_string();
    let (command, data) = match dialect {
        WireDialect::Compat => (
            Cow::Borrowed(packet.command().tag_string()),
            Cow::Borrowed(payload.as_str()),
        ),
        WireDialect::Strict => (
            escape(packet.command().tag_string()),
            escape(&payload),
        ),
    };
    let author = match packet.author_id() {
        Some(id) => Cow::Owned(id.to_string()),
        None => Cow::Borrowed(NULL_ID),
    };

    let text = format!(
        "{{\"{}\":\"{}\", \"{}\":\" {}\", \"{}\":\"{}\", \"{}\":\"{}\"}}",
        FIELD_COMMAND,
        command,
        FIELD_DATA,
        data,
        FIELD_PACKET_ID,
        packet.packet_id(),
        FIELD_AUTHOR_ID,
        author
    );

    tracing::trace!(
        packet = %packet.short_packet_id(),
        ?dialect,
        len = text.len(),
        "encoded packet"
    );
    text
}

/// Escape `\`, `"` and line control characters; borrows when nothing changes
fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

// =============================================================================
// Compat Decoding (field-name seek + quote scan)
// =============================================================================

/// Decode compat wire text
///
/// Every field is located independently by name, so the four fields may
/// come in any order. The first occurrence of a name wins even when it sits
/// inside another field's value; such input decodes to the wrong packet or
/// fails.
pub fn decode_packet(text: &str) -> Result<Packet> {
    decode_with(text, WireDialect::Compat)
}

fn decode_compat(text: &str) -> DecodeResult<Packet> {
    let data = strip_template_space(seek_field(text, FIELD_DATA)?);
    let command = Command::new(seek_field(text, FIELD_COMMAND)?);
    let author_id = parse_author_id(seek_field(text, FIELD_AUTHOR_ID)?)?;
    let packet_id = parse_packet_id(seek_field(text, FIELD_PACKET_ID)?)?;

    Ok(Packet::from_parts(
        command,
        Payload::from_wire(data),
        author_id,
        packet_id,
    ))
}

/// Raw value of `field`: from name + 3 up to the next `"`
fn seek_field<'a>(text: &'a str, field: &'static str) -> DecodeResult<&'a str> {
    let at = text.find(field).ok_or(DecodeError::FieldNotFound { field })?;
    let start = at + field.len() + VALUE_OFFSET;

    if start > text.len() {
        return Err(DecodeError::FieldNotFound { field });
    }
    let rest = text.get(start..).ok_or_else(|| DecodeError::Syntax {
        offset: start,
        message: format!("value of `{}` does not start on a character boundary", field),
    })?;

    let end = rest
        .find('"')
        .ok_or(DecodeError::UnterminatedValue { field })?;
    Ok(&rest[..end])
}

// =============================================================================
// Strict Decoding (single-pass tokenizer)
// =============================================================================

/// Decode wire text with the tokenizer
///
/// Accepts the same schema as `decode_packet` with escaped values, any
/// field order and unknown extra fields.
pub fn decode_packet_strict(text: &str) -> Result<Packet> {
    decode_with(text, WireDialect::Strict)
}

/// Values collected by the tokenizer, one slot per known field
#[derive(Default)]
struct Fields {
    command: Option<String>,
    data: Option<String>,
    packet_id: Option<String>,
    author_id: Option<String>,
}

impl Fields {
    fn slot(&mut self, key: &str) -> Option<(&'static str, &mut Option<String>)> {
        match key {
            FIELD_COMMAND => Some((FIELD_COMMAND, &mut self.command)),
            FIELD_DATA => Some((FIELD_DATA, &mut self.data)),
            FIELD_PACKET_ID => Some((FIELD_PACKET_ID, &mut self.packet_id)),
            FIELD_AUTHOR_ID => Some((FIELD_AUTHOR_ID, &mut self.author_id)),
            _ => None,
        }
    }
}

fn require(value: Option<String>, field: &'static str) -> DecodeResult<String> {
    value.ok_or(DecodeError::FieldNotFound { field })
}

fn decode_strict(text: &str) -> DecodeResult<Packet> {
    let fields = Tokenizer::new(text).read_object()?;

    let data = require(fields.data, FIELD_DATA)?;
    let command = require(fields.command, FIELD_COMMAND)?;
    let author_id = parse_author_id(&require(fields.author_id, FIELD_AUTHOR_ID)?)?;
    let packet_id = parse_packet_id(&require(fields.packet_id, FIELD_PACKET_ID)?)?;

    Ok(Packet::from_parts(
        Command::new(command),
        Payload::from_wire(strip_template_space(&data)),
        author_id,
        packet_id,
    ))
}

/// Cursor over wire text
///
/// Structural characters are all ASCII, so the cursor walks bytes. UTF-8
/// continuation bytes never equal `"` or `\`, which keeps every slice on a
/// character boundary.
struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn read_object(mut self) -> DecodeResult<Fields> {
        let mut fields = Fields::default();

        self.skip_whitespace();
        self.expect(b'{')?;
        self.skip_whitespace();

        if self.peek() == Some(b'}') {
            self.pos += 1;
        } else {
            loop {
                self.read_pair(&mut fields)?;
                self.skip_whitespace();
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.skip_whitespace();
                    }
                    Some(b'}') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.syntax("expected ',' or '}'")),
                }
            }
        }

        self.skip_whitespace();
        if self.pos != self.text.len() {
            return Err(self.syntax("trailing characters after packet"));
        }
        Ok(fields)
    }

    fn read_pair(&mut self, fields: &mut Fields) -> DecodeResult<()> {
        let key = self.read_string()?;
        self.skip_whitespace();
        self.expect(b':')?;
        self.skip_whitespace();
        let value = self.read_string()?;

        match fields.slot(&key) {
            Some((field, slot)) => {
                if slot.is_some() {
                    return Err(DecodeError::DuplicateField { field });
                }
                *slot = Some(value);
            }
            None => tracing::debug!(key = %key, "skipping unknown packet field"),
        }
        Ok(())
    }

    fn read_string(&mut self) -> DecodeResult<String> {
        self.expect(b'"')?;

        let mut out = String::new();
        let mut run_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.syntax("unterminated string")),
                Some(b'"') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    let escaped = match self.text.as_bytes().get(self.pos + 1) {
                        Some(b'\\') => '\\',
                        Some(b'"') => '"',
                        Some(b'n') => '\n',
                        Some(b'r') => '\r',
                        Some(b't') => '\t',
                        _ => return Err(self.syntax("unknown escape sequence")),
                    };
                    out.push(escaped);
                    self.pos += 2;
                    run_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> DecodeResult<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.syntax(&format!("expected '{}'", byte as char)))
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn syntax(&self, message: &str) -> DecodeError {
        DecodeError::Syntax {
            offset: self.pos,
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Field Conversion
// =============================================================================

/// Drop the single space the template puts in front of the payload
fn strip_template_space(raw: &str) -> &str {
    raw.strip_prefix(' ').unwrap_or(raw)
}

fn parse_id(raw: &str, field: &'static str) -> DecodeResult<Option<Uuid>> {
    if raw == NULL_ID {
        return Ok(None);
    }
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|source| DecodeError::InvalidIdentifier {
            field,
            value: raw.to_string(),
            source,
        })
}

fn parse_author_id(raw: &str) -> DecodeResult<Option<Uuid>> {
    parse_id(raw, FIELD_AUTHOR_ID)
}

fn parse_packet_id(raw: &str) -> DecodeResult<Uuid> {
    parse_id(raw, FIELD_PACKET_ID)?.ok_or(DecodeError::NullPacketId)
}

fn decode_with(text: &str, dialect: WireDialect) -> Result<Packet> {
    let decoded = match dialect {
        WireDialect::Compat => decode_compat(text),
        WireDialect::Strict => decode_strict(text),
    };

    match decoded {
        Ok(packet) => {
            tracing::trace!(
                packet = %packet.short_packet_id(),
                author = %packet.short_author_id(),
                packet_type = packet.packet_type(),
                "decoded packet"
            );
            Ok(packet)
        }
        Err(e) => {
            tracing::debug!(error = %e, ?dialect, len = text.len(), "failed to decode packet");
            Err(PacketError::Decode(e))
        }
    }
}

// =============================================================================
// Codec
// =============================================================================

/// Encoder/decoder bound to a `CodecConfig`
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: CodecConfig,
}

impl PacketCodec {
    /// Create a codec, rejecting an unusable config
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode in the configured dialect
    pub fn encode(&self, packet: &Packet) -> String {
        encode_with(packet, self.config.dialect)
    }

    /// Decode in the configured dialect
    pub fn decode(&self, text: &str) -> Result<Packet> {
        decode_with(text, self.config.dialect)
    }

    /// Write one packet as a line and flush
    pub fn write_packet<W: Write>(&self, writer: &mut W, packet: &Packet) -> Result<()> {
        let text = self.encode(packet);

        if text.contains(['\n', '\r']) {
            return Err(PacketError::Framing(format!(
                "packet {} encodes to text with a line break",
                packet.short_packet_id()
            )));
        }
        if text.len() > self.config.max_message_size {
            return Err(PacketError::MessageTooLarge {
                size: text.len(),
                max: self.config.max_message_size,
            });
        }

        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Read the next packet line
    ///
    /// Blank lines are skipped. Returns `Ok(None)` at end of stream. A final
    /// line without a terminator is still decoded. An oversized line is
    /// consumed up to its terminator before `MessageTooLarge` is returned,
    /// so the next call starts on the following line.
    pub fn read_packet<R: BufRead>(&self, reader: &mut R) -> Result<Option<Packet>> {
        let max = self.config.max_message_size;
        // room for "\r\n"
        let limit = max as u64 + 2;

        loop {
            let mut line = Vec::new();
            let read = reader.by_ref().take(limit).read_until(b'\n', &mut line)?;
            if read == 0 {
                return Ok(None);
            }

            if !line.ends_with(b"\n") && read as u64 == limit {
                skip_line(reader)?;
                return Err(PacketError::MessageTooLarge { size: read, max });
            }

            let bytes = line
                .strip_suffix(b"\n")
                .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
                .unwrap_or(&line[..]);
            if bytes.len() > max {
                return Err(PacketError::MessageTooLarge {
                    size: bytes.len(),
                    max,
                });
            }

            let text = std::str::from_utf8(bytes).map_err(|e| {
                PacketError::Framing(format!("packet line is not valid UTF-8: {}", e))
            })?;
            if text.trim().is_empty() {
                continue;
            }

            return self.decode(text).map(Some);
        }
    }
}

/// Discard everything up to and including the next `\n`
fn skip_line<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let (done, used) = {
            let buf = reader.fill_buf()?;
            match buf.iter().position(|b| *b == b'\n') {
                Some(i) => (true, i + 1),
                None => (buf.is_empty(), buf.len()),
            }
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a packet line with the default codec
pub fn write_packet<W: Write>(writer: &mut W, packet: &Packet) -> Result<()> {
    PacketCodec::default().write_packet(writer, packet)
}

/// Read a packet line with the default codec
pub fn read_packet<R: BufRead>(reader: &mut R) -> Result<Option<Packet>> {
    PacketCodec::default().read_packet(reader)
}
