//! Payload definitions
//!
//! The data a packet carries. The wire format can only tell numbers from
//! text, so those are the only kinds a payload can hold, plus an explicit
//! null.

use std::fmt;

use crate::id::NULL_ID;

/// Data carried by a packet
///
/// ## Round-trip rules
/// - `Number(x)` decodes as `Number(x)`
/// - `Text(s)` decodes as `Text(s)` unless `s` parses as an `f64`, in which
///   case it decodes as a number (`"42"` becomes `Number(42.0)`)
/// - `Null` renders as `null` and decodes as `Text("null")`
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Floating point number
    Number(f64),

    /// Arbitrary text
    Text(String),

    /// No data
    Null,
}

impl Payload {
    /// Recover a payload from a raw wire value
    ///
    /// Anything that parses as an `f64` once surrounding whitespace and
    /// control characters are trimmed is a number; everything else is kept
    /// as text, untrimmed. This is the only type-recovery rule.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim_matches(|c: char| c <= ' ').parse::<f64>() {
            Ok(n) => Payload::Number(n),
            Err(_) => Payload::Text(raw.to_string()),
        }
    }

    /// Short name of the payload kind, for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Payload::Number(_) => "Number",
            Payload::Text(_) => "Text",
            Payload::Null => NULL_ID,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Payload::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Number(n) => write!(f, "{}", n),
            Payload::Text(s) => f.write_str(s),
            Payload::Null => f.write_str(NULL_ID),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<f64> for Payload {
    fn from(n: f64) -> Self {
        Payload::Number(n)
    }
}

impl From<f32> for Payload {
    fn from(n: f32) -> Self {
        Payload::Number(f64::from(n))
    }
}

impl From<i32> for Payload {
    fn from(n: i32) -> Self {
        Payload::Number(f64::from(n))
    }
}

impl From<u32> for Payload {
    fn from(n: u32) -> Self {
        Payload::Number(f64::from(n))
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Payload::Null, Into::into)
    }
}
