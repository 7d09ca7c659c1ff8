//! Parser Tests
//!
//! Tests for incremental packet decoding under arbitrary fragmentation.

use linewire::protocol::{encode_request, PacketParser};
use linewire::LinewireError;

// =============================================================================
// Helpers
// =============================================================================

/// Serialize a field list into wire bytes
fn wire(fields: &[&[u8]]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_request(fields, &mut buf);
    buf
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_simple() {
    let bytes = wire(&[b"ok", b"hello"]);

    let mut parser = PacketParser::new();
    parser.feed(&bytes);

    let packet = parser.try_next().unwrap().expect("complete packet");
    assert_eq!(packet.status(), b"ok");
    assert_eq!(packet.body(), &[b"hello".to_vec()]);
}

#[test]
fn test_round_trip_empty_fields() {
    let bytes = wire(&[b"ok", b"", b"x", b""]);

    let mut parser = PacketParser::new();
    parser.feed(&bytes);

    let packet = parser.try_next().unwrap().expect("complete packet");
    assert_eq!(
        packet.into_fields(),
        vec![b"ok".to_vec(), b"".to_vec(), b"x".to_vec(), b"".to_vec()]
    );
}

#[test]
fn test_round_trip_binary_payloads() {
    // Embedded newlines and NUL bytes must survive: framing is byte-counted,
    // not line-escaped.
    let gnarly: Vec<u8> = vec![b'\n', 0x00, b'\n', 0xFF, 0x80, b'\n'];
    let all_bytes: Vec<u8> = (0..=255).collect();
    let bytes = wire(&[b"ok", &gnarly, &all_bytes]);

    let mut parser = PacketParser::new();
    parser.feed(&bytes);

    let packet = parser.try_next().unwrap().expect("complete packet");
    assert_eq!(packet.body(), &[gnarly, all_bytes]);
}

// =============================================================================
// Fragmentation Tests
// =============================================================================

#[test]
fn test_byte_at_a_time_feed() {
    let bytes = wire(&[b"ok", b"value with\nnewline"]);

    let mut parser = PacketParser::new();
    for (idx, byte) in bytes.iter().enumerate() {
        parser.feed(&[*byte]);
        let decoded = parser.try_next().unwrap();
        if idx < bytes.len() - 1 {
            assert!(decoded.is_none(), "packet decoded early at byte {}", idx);
        } else {
            let packet = decoded.expect("packet after final byte");
            assert_eq!(packet.status(), b"ok");
        }
    }

    // Exactly once: nothing left afterwards.
    assert!(parser.try_next().unwrap().is_none());
    assert_eq!(parser.buffered(), 0);
}

#[test]
fn test_arbitrary_split_points() {
    let bytes = wire(&[b"ok", b"alpha", b"beta", b"gamma"]);

    // Every two-chunk split of the serialized packet must behave the same.
    for split in 1..bytes.len() {
        let mut parser = PacketParser::new();
        parser.feed(&bytes[..split]);
        assert!(
            parser.try_next().unwrap().is_none(),
            "premature packet at split {}",
            split
        );
        parser.feed(&bytes[split..]);
        let packet = parser.try_next().unwrap().expect("packet after rest");
        assert_eq!(
            packet.into_fields(),
            vec![
                b"ok".to_vec(),
                b"alpha".to_vec(),
                b"beta".to_vec(),
                b"gamma".to_vec()
            ]
        );
    }
}

#[test]
fn test_split_inside_length_header() {
    let mut parser = PacketParser::new();
    parser.feed(b"1");
    assert!(parser.try_next().unwrap().is_none());
    parser.feed(b"0\n0123456789\n\n");
    let packet = parser.try_next().unwrap().expect("complete packet");
    assert_eq!(packet.status(), b"0123456789");
}

// =============================================================================
// Queued Packet Tests
// =============================================================================

#[test]
fn test_two_packets_in_one_feed() {
    let mut bytes = wire(&[b"ok", b"first"]);
    bytes.extend_from_slice(&wire(&[b"not_found"]));

    let mut parser = PacketParser::new();
    parser.feed(&bytes);

    let first = parser.try_next().unwrap().expect("first packet");
    assert_eq!(first.into_fields(), vec![b"ok".to_vec(), b"first".to_vec()]);

    let second = parser.try_next().unwrap().expect("second packet");
    assert_eq!(second.into_fields(), vec![b"not_found".to_vec()]);

    assert!(parser.try_next().unwrap().is_none());
}

#[test]
fn test_trailing_partial_packet_is_retained() {
    let first = wire(&[b"ok", b"done"]);
    let second = wire(&[b"ok", b"pending"]);

    let mut parser = PacketParser::new();
    parser.feed(&first);
    parser.feed(&second[..3]);

    let packet = parser.try_next().unwrap().expect("first packet");
    assert_eq!(packet.body(), &[b"done".to_vec()]);
    assert!(parser.try_next().unwrap().is_none());

    parser.feed(&second[3..]);
    let packet = parser.try_next().unwrap().expect("second packet");
    assert_eq!(packet.body(), &[b"pending".to_vec()]);
}

// =============================================================================
// Reset Tests
// =============================================================================

#[test]
fn test_clear_drops_partial_state() {
    let mut parser = PacketParser::new();
    parser.feed(b"2\nok\n5\npar");
    assert!(parser.try_next().unwrap().is_none());

    parser.clear();
    assert_eq!(parser.buffered(), 0);

    // A fresh packet decodes cleanly with no leakage from the old bytes.
    parser.feed(&wire(&[b"ok"]));
    let packet = parser.try_next().unwrap().expect("packet after clear");
    assert_eq!(packet.into_fields(), vec![b"ok".to_vec()]);
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_non_digit_length_header() {
    let mut parser = PacketParser::new();
    parser.feed(b"2x\nok\n\n");
    let err = parser.try_next().unwrap_err();
    assert!(matches!(err, LinewireError::Corrupt(_)), "got {:?}", err);
}

#[test]
fn test_payload_missing_trailing_newline() {
    let mut parser = PacketParser::new();
    parser.feed(b"2\nokX3\nabc\n\n");
    let err = parser.try_next().unwrap_err();
    assert!(matches!(err, LinewireError::Corrupt(_)), "got {:?}", err);
}

#[test]
fn test_length_header_overflow() {
    let mut parser = PacketParser::new();
    parser.feed(b"99999999999999999999\nx\n\n");
    let err = parser.try_next().unwrap_err();
    assert!(matches!(err, LinewireError::Corrupt(_)), "got {:?}", err);
}

#[test]
fn test_length_exceeding_block_cap() {
    let mut parser = PacketParser::new();
    parser.feed(b"999999999\n");
    let err = parser.try_next().unwrap_err();
    assert!(matches!(err, LinewireError::Corrupt(_)), "got {:?}", err);
}

#[test]
fn test_unterminated_header_run() {
    // A long digit run with no newline cannot be a valid header.
    let mut parser = PacketParser::new();
    parser.feed(b"1111111111111111111111111");
    let err = parser.try_next().unwrap_err();
    assert!(matches!(err, LinewireError::Corrupt(_)), "got {:?}", err);
}

#[test]
fn test_terminator_without_fields() {
    let mut parser = PacketParser::new();
    parser.feed(b"\n");
    let err = parser.try_next().unwrap_err();
    assert!(matches!(err, LinewireError::Corrupt(_)), "got {:?}", err);
}

#[test]
fn test_incomplete_is_not_corrupt() {
    // "Need more bytes" and "malformed" must stay distinguishable.
    let mut parser = PacketParser::new();
    parser.feed(b"5\nhel");
    assert!(parser.try_next().unwrap().is_none());
    parser.feed(b"lo\n\n");
    let packet = parser.try_next().unwrap().expect("completed packet");
    assert_eq!(packet.status(), b"hello");
}
