//! Character-matrix display module.
//!
//! Turns styled text into 64-byte HID reports and writes them to the device.

mod color;
mod device;
mod payload;
mod protocol;
mod text;

pub use color::{prefix_byte, prefix_in_range, Background, Foreground};
pub use device::{
    DisplayWriter, HidTransport, SendStatus, Transport, WriterOptions, INIT_DELAY,
    MIN_WRITE_DELAY,
};
pub use payload::{build_payload, Payload, DEFAULT_PREFIX, FILLER_TRIPLET};
pub use protocol::{format_packet_line, packetize, Packet, FRAME_BYTE, PACKET_SIZE};
pub use text::{normalize, TextBlock};

/// Encodes styled text into the packets a send would write.
///
/// Normalizes the blocks to the display capacity, builds the colored payload
/// and slices it into framed packets.
pub fn encode_text(blocks: &[TextBlock]) -> Vec<Packet> {
    let normalized = normalize(blocks);
    let payload = build_payload(&normalized);
    packetize(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_green_text() {
        let blocks = [TextBlock::styled("AB", "green", "black")];
        let packets = encode_text(&blocks);

        // 336 characters * 3 bytes = 1008 = 16 full chunks of 63
        assert_eq!(packets.len(), 16);
        assert_eq!(
            &packets[0][..7],
            &[FRAME_BYTE, 0x84, 0x00, 0x41, 0x84, 0x00, 0x42]
        );
        assert!(packets
            .iter()
            .all(|p| p.len() == PACKET_SIZE && p[0] == FRAME_BYTE));
    }

    #[test]
    fn test_encode_empty_input() {
        let packets = encode_text(&[]);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0][0], FRAME_BYTE);
        for triplet in packets[0][1..].chunks(3) {
            assert_eq!(triplet, &[0x42, 0x00, 0x20]);
        }
    }

    #[test]
    fn test_encode_does_not_touch_input() {
        let blocks = vec![TextBlock::new("hello")];
        let _ = encode_text(&blocks);
        assert_eq!(blocks[0].text, "hello");
    }
}
