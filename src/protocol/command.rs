//! Command definitions
//!
//! A command is the tag a packet carries to tell the receiver how to treat
//! its payload. Tags are semicolon-separated segments:
//!
//! ```text
//! {messageType};{dataType};{reserved...}
//! ```
//!
//! Parsing is lenient: any string is a valid tag, and an unrecognized
//! message type is the router's concern, never a parse error.

use std::fmt;

/// Separator between tag segments
pub const SEGMENT_SEPARATOR: char = ';';

/// Tag used by `Packet::simple_text`
pub const SIMPLE_TEXT: &str = "SIMPLE_TEXT";

/// Display form of an empty message type
const EMPTY_TYPE: &str = "(none)";

/// A command tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    tag: String,
}

impl Command {
    /// Wrap a raw tag. Nothing is validated.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// The well-known simple text command
    pub fn simple_text() -> Self {
        Self::new(SIMPLE_TEXT)
    }

    /// Message type: everything before the first `;`
    ///
    /// A tag without a separator is its own type, so `"noop"` has type
    /// `"noop"` and the empty tag has the empty type.
    pub fn message_type(&self) -> &str {
        match self.tag.split_once(SEGMENT_SEPARATOR) {
            Some((head, _)) => head,
            None => &self.tag,
        }
    }

    /// Data type: the second segment, if present and non-empty
    pub fn data_type(&self) -> Option<&str> {
        self.segments().nth(1).filter(|s| !s.is_empty())
    }

    /// All segments of the tag, in order
    ///
    /// A trailing separator yields a trailing empty segment, so
    /// `"chat;text;"` has the segments `chat`, `text` and `""`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.tag.split(SEGMENT_SEPARATOR)
    }

    /// Message type for display; `(none)` when the type is empty
    pub fn type_string(&self) -> String {
        match self.message_type() {
            "" => EMPTY_TYPE.to_string(),
            ty => ty.to_string(),
        }
    }

    /// The raw tag, unmodified
    pub fn tag_string(&self) -> &str {
        &self.tag
    }

    /// Whether this is the simple text command
    pub fn is_simple_text(&self) -> bool {
        self.tag == SIMPLE_TEXT
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl From<&str> for Command {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Command {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<&Command> for Command {
    fn from(command: &Command) -> Self {
        command.clone()
    }
}
