//! Tests for Packet construction and display
//!
//! These tests verify:
//! - Every factory assigns a fresh id
//! - Injected generators make ids reproducible
//! - Identity-based equality
//! - Payload conversions
//! - Shortened and long display strings

use std::collections::HashSet;

use peerpacket::id::{IdGenerator, SequentialIdGenerator};
use peerpacket::protocol::{Command, Packet, Payload, SIMPLE_TEXT};
use uuid::Uuid;

fn author() -> Uuid {
    Uuid::parse_str("1b4e28ba-2fa1-11d2-883f-0016d3cca427").unwrap()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_new_from_tag_string() {
    let packet = Packet::new("chat;text;", "hi", Some(author()));

    assert_eq!(packet.command(), &Command::new("chat;text;"));
    assert_eq!(packet.payload(), &Payload::Text("hi".to_string()));
    assert_eq!(packet.author_id(), Some(author()));
    assert_eq!(packet.packet_type(), "chat");
}

#[test]
fn test_new_from_command() {
    let cmd = Command::new("score;number;");
    let packet = Packet::new(cmd.clone(), 12.5_f64, None);

    assert_eq!(packet.command(), &cmd);
    assert_eq!(packet.payload(), &Payload::Number(12.5));
    assert_eq!(packet.author_id(), None);
}

#[test]
fn test_simple_text() {
    let packet = Packet::simple_text("hello", Some(author()));

    assert_eq!(packet.command().tag_string(), SIMPLE_TEXT);
    assert_eq!(packet.payload().as_text(), Some("hello"));
    assert_eq!(packet.author_id(), Some(author()));
}

#[test]
fn test_new_with_injected_generator() {
    let ids = SequentialIdGenerator::new();

    let first = Packet::new_with(&ids, "a", "x", None);
    let second = Packet::simple_text_with(&ids, "y", None);

    assert_eq!(first.packet_id(), Uuid::from_u64_pair(0, 1));
    assert_eq!(second.packet_id(), Uuid::from_u64_pair(0, 2));
}

#[test]
fn test_fresh_ids_do_not_collide() {
    let mut seen = HashSet::new();
    for i in 0..10_000_i32 {
        let packet = match i % 3 {
            0 => Packet::new("chat;text;", "x", None),
            1 => Packet::new(Command::new("chat"), i, None),
            _ => Packet::simple_text("x", None),
        };
        assert!(seen.insert(packet.packet_id()), "duplicate id at {}", i);
    }
    assert_eq!(seen.len(), 10_000);
}

// =============================================================================
// Identity Tests
// =============================================================================

#[test]
fn test_equality_is_packet_id() {
    let ids = SequentialIdGenerator::new();
    let a = Packet::new_with(&ids, "chat", "one", None);
    let b = Packet::new_with(&ids, "chat", "one", None);

    // same content, different identity
    assert_ne!(a, b);
    assert_eq!(a, a.clone());

    // same identity, different content
    let same_id = SequentialIdGenerator::new();
    let c = Packet::new_with(&same_id, "other", 3.0_f64, Some(author()));
    assert_eq!(a, c);
}

#[test]
fn test_packets_hash_by_id() {
    let ids = SequentialIdGenerator::new();
    let a = Packet::new_with(&ids, "chat", "one", None);
    let b = Packet::new_with(&ids, "chat", "one", None);

    let set: HashSet<Packet> = [a.clone(), a, b].into_iter().collect();
    assert_eq!(set.len(), 2);
}

// =============================================================================
// Payload Tests
// =============================================================================

#[test]
fn test_payload_conversions() {
    assert_eq!(Payload::from(2.5_f64), Payload::Number(2.5));
    assert_eq!(Payload::from(1.5_f32), Payload::Number(1.5));
    assert_eq!(Payload::from(-3_i32), Payload::Number(-3.0));
    assert_eq!(Payload::from(7_u32), Payload::Number(7.0));
    assert_eq!(Payload::from("s"), Payload::Text("s".to_string()));
    assert_eq!(Payload::from(String::from("s")), Payload::Text("s".to_string()));
    assert_eq!(Payload::from(None::<f64>), Payload::Null);
    assert_eq!(Payload::from(Some("s")), Payload::Text("s".to_string()));
}

#[test]
fn test_payload_from_wire() {
    assert_eq!(Payload::from_wire("42"), Payload::Number(42.0));
    assert_eq!(Payload::from_wire("-0.25"), Payload::Number(-0.25));
    assert_eq!(Payload::from_wire("1e3"), Payload::Number(1000.0));
    assert_eq!(Payload::from_wire("hello"), Payload::Text("hello".to_string()));
    assert_eq!(Payload::from_wire(""), Payload::Text(String::new()));
    assert_eq!(Payload::from_wire("null"), Payload::Text("null".to_string()));
    assert_eq!(Payload::from_wire("42 apples"), Payload::Text("42 apples".to_string()));
}

#[test]
fn test_payload_from_wire_trims_around_numbers_only() {
    assert_eq!(Payload::from_wire(" 42 "), Payload::Number(42.0));
    assert_eq!(Payload::from_wire("\t1.5\n"), Payload::Number(1.5));
    assert_eq!(Payload::from_wire("  hi  "), Payload::Text("  hi  ".to_string()));
    assert_eq!(Payload::from_wire("   "), Payload::Text("   ".to_string()));
}

#[test]
fn test_payload_display() {
    assert_eq!(Payload::Number(42.0).to_string(), "42");
    assert_eq!(Payload::Number(0.5).to_string(), "0.5");
    assert_eq!(Payload::Text("t".to_string()).to_string(), "t");
    assert_eq!(Payload::Null.to_string(), "null");
}

#[test]
fn test_payload_accessors() {
    assert_eq!(Payload::Number(1.0).as_number(), Some(1.0));
    assert_eq!(Payload::Number(1.0).as_text(), None);
    assert_eq!(Payload::Text("a".to_string()).as_number(), None);
    assert!(Payload::Null.is_null());
    assert_eq!(Payload::Null.kind_name(), "null");
}

// =============================================================================
// Display String Tests
// =============================================================================

#[test]
fn test_shortened_string() {
    let ids = SequentialIdGenerator::starting_at(0xabc);
    let packet = Packet::new_with(&ids, "chat;text;", "hi", Some(author()));

    assert_eq!(
        packet.to_string(),
        "Packet{PacketID: 000000000abc, DataType: Text, AuthID: 0016d3cca427, Type: chat}"
    );
    assert_eq!(packet.to_string(), packet.to_shortened_string());
}

#[test]
fn test_shortened_string_without_author() {
    let ids = SequentialIdGenerator::new();
    let packet = Packet::new_with(&ids, "", 1_i32, None);

    assert_eq!(
        packet.to_shortened_string(),
        "Packet{PacketID: 000000000001, DataType: Number, AuthID: null, Type: (none)}"
    );
    assert_eq!(packet.short_author_id(), "null");
}

#[test]
fn test_long_string() {
    let ids = SequentialIdGenerator::new();
    let packet = Packet::new_with(&ids, "chat;text;", "hi", Some(author()));

    assert_eq!(
        packet.to_long_string(),
        "Packet{PacketID: 00000000-0000-0000-0000-000000000001, Command: chat;text;, \
         Data: hi, AuthID: 1b4e28ba-2fa1-11d2-883f-0016d3cca427, Type: chat}"
    );
}

#[test]
fn test_generator_trait_object() {
    let ids: Box<dyn IdGenerator> = Box::new(SequentialIdGenerator::starting_at(5));
    let packet = Packet::new_with(ids.as_ref(), "a", "b", None);
    assert_eq!(packet.packet_id(), Uuid::from_u64_pair(0, 5));
}
