//! Tests for Command tag parsing
//!
//! These tests verify:
//! - Message type extraction with and without separators
//! - Data type and segment access
//! - Display strings
//! - Value equality on the raw tag

use std::collections::HashSet;

use peerpacket::protocol::{Command, SIMPLE_TEXT};

// =============================================================================
// Message Type Tests
// =============================================================================

#[test]
fn test_type_before_first_separator() {
    let cmd = Command::new("chat;text;");
    assert_eq!(cmd.message_type(), "chat");
}

#[test]
fn test_type_without_separator_is_whole_tag() {
    let cmd = Command::new("noop");
    assert_eq!(cmd.message_type(), "noop");
}

#[test]
fn test_type_of_empty_tag() {
    let cmd = Command::new("");
    assert_eq!(cmd.message_type(), "");
    assert_eq!(cmd.type_string(), "(none)");
}

#[test]
fn test_type_with_leading_separator() {
    let cmd = Command::new(";text;");
    assert_eq!(cmd.message_type(), "");
    assert_eq!(cmd.data_type(), Some("text"));
}

#[test]
fn test_type_uses_first_separator_only() {
    let cmd = Command::new("move;vector;x;y;z");
    assert_eq!(cmd.message_type(), "move");
}

// =============================================================================
// Segment Tests
// =============================================================================

#[test]
fn test_data_type() {
    assert_eq!(Command::new("chat;text;").data_type(), Some("text"));
    assert_eq!(Command::new("chat;;").data_type(), None);
    assert_eq!(Command::new("chat").data_type(), None);
}

#[test]
fn test_segments_keep_trailing_empty() {
    let cmd = Command::new("chat;text;");
    let segments: Vec<&str> = cmd.segments().collect();
    assert_eq!(segments, vec!["chat", "text", ""]);
}

// =============================================================================
// Display Tests
// =============================================================================

#[test]
fn test_tag_string_is_verbatim() {
    let raw = "  weird;;tag with spaces; ";
    let cmd = Command::new(raw);
    assert_eq!(cmd.tag_string(), raw);
    assert_eq!(cmd.to_string(), raw);
}

#[test]
fn test_type_string() {
    assert_eq!(Command::new("chat;text;").type_string(), "chat");
    assert_eq!(Command::new("noop").type_string(), "noop");
}

// =============================================================================
// Equality / Construction Tests
// =============================================================================

#[test]
fn test_equality_on_raw_tag() {
    assert_eq!(Command::new("chat;text;"), Command::from("chat;text;"));
    assert_ne!(Command::new("chat;text;"), Command::new("chat;text"));

    let set: HashSet<Command> = ["a", "a", "b"].into_iter().map(Command::from).collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_simple_text_command() {
    let cmd = Command::simple_text();
    assert_eq!(cmd.tag_string(), SIMPLE_TEXT);
    assert_eq!(cmd.message_type(), SIMPLE_TEXT);
    assert!(cmd.is_simple_text());
    assert!(!Command::new("chat").is_simple_text());
}
