//! Identifier Module
//!
//! Packet and author identifiers are 128-bit UUIDs.
//!
//! ## Responsibilities
//! - Generate fresh packet identifiers through an injectable `IdGenerator`
//! - Provide the shortened display form used in logs
//!
//! ## Shortened Form
//! ```text
//! 1b4e28ba-2fa1-11d2-883f-0016d3cca427
//!                         └──────────┘
//!                      last 12 characters
//! ```
//!
//! The shortened form is NOT unique. Never use it as a lookup key.

mod generator;

pub use generator::{IdGenerator, RandomIdGenerator, SeededIdGenerator, SequentialIdGenerator};

use uuid::Uuid;

/// Number of trailing characters kept by `shorten_id`
pub const SHORT_ID_LEN: usize = 12;

/// Text used for an absent identifier, both on the wire and in logs
pub const NULL_ID: &str = "null";

/// Shortened display form of an identifier
///
/// Returns `"null"` for an absent id, otherwise the last 12 characters of
/// its canonical hyphenated form.
pub fn shorten_id(id: Option<Uuid>) -> String {
    match id {
        None => NULL_ID.to_string(),
        Some(id) => {
            let full = id.hyphenated().to_string();
            // canonical form is ASCII, byte offsets are char offsets
            full[full.len() - SHORT_ID_LEN..].to_string()
        }
    }
}
