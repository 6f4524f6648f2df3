//! Wire format: 64-byte HID reports.
//!
//! Protocol structure:
//! - Packet size: 64 bytes (1 framing byte + 63 payload bytes)
//! - Framing byte: 0xF2
//! - A short final chunk is padded with whole filler triplets, then zeros

use super::payload::{Payload, FILLER_TRIPLET};

/// Total packet size including the framing byte.
pub const PACKET_SIZE: usize = 64;

/// Payload bytes carried by each packet.
pub const CHUNK_SIZE: usize = PACKET_SIZE - 1;

/// Framing byte leading every packet.
pub const FRAME_BYTE: u8 = 0xF2;

/// One HID report.
pub type Packet = [u8; PACKET_SIZE];

/// Builds one packet from a chunk of at most [`CHUNK_SIZE`] bytes.
fn build_packet(chunk: &[u8]) -> Packet {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = FRAME_BYTE;
    packet[1..=chunk.len()].copy_from_slice(chunk);

    let mut filled = chunk.len();
    while filled + FILLER_TRIPLET.len() <= CHUNK_SIZE {
        packet[1 + filled..1 + filled + FILLER_TRIPLET.len()].copy_from_slice(&FILLER_TRIPLET);
        filled += FILLER_TRIPLET.len();
    }
    // Anything left past the last whole triplet stays zero.

    packet
}

/// Slices a payload into framed packets, in order.
pub fn packetize(payload: &Payload) -> Vec<Packet> {
    payload
        .as_bytes()
        .chunks(CHUNK_SIZE)
        .map(build_packet)
        .collect()
}

/// Formats a packet as a bracketed hex line, e.g. `[0xf2, 0x84, 0x00]`.
///
/// The output is accepted by the init-file parser.
pub fn format_packet_line(packet: &[u8]) -> String {
    let bytes: Vec<String> = packet.iter().map(|b| format!("0x{:02x}", b)).collect();
    format!("[{}]", bytes.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_of(cells: usize) -> Payload {
        let mut payload = Payload::new();
        for i in 0..cells {
            payload.push(0x84, b'a' + (i % 26) as u8);
        }
        payload
    }

    #[test]
    fn test_full_chunks() {
        let payload = payload_of(42); // 126 bytes = 2 chunks
        let packets = packetize(&payload);
        assert_eq!(packets.len(), 2);
        assert_eq!(&packets[0][1..], &payload.as_bytes()[..CHUNK_SIZE]);
        assert_eq!(&packets[1][1..], &payload.as_bytes()[CHUNK_SIZE..]);
    }

    #[test]
    fn test_short_final_chunk_padding() {
        let payload = payload_of(25); // 75 bytes: 63 + 12
        let packets = packetize(&payload);
        assert_eq!(packets.len(), 2);

        let last = &packets[1];
        assert_eq!(last[0], FRAME_BYTE);
        assert_eq!(&last[1..13], &payload.as_bytes()[CHUNK_SIZE..]);
        for triplet in last[13..].chunks(3) {
            assert_eq!(triplet, &FILLER_TRIPLET);
        }
    }

    #[test]
    fn test_zero_fill_when_triplet_does_not_fit() {
        let mut payload = Payload::new();
        payload.push(0x21, b'x');
        let mut bytes = payload.as_bytes().to_vec();
        bytes.push(0x99); // 4 bytes, off the triplet grid

        let packet = build_packet(&bytes);
        // 4 + 19 * 3 = 61, two zero bytes remain
        assert_eq!(&packet[1..5], &[0x21, 0x00, b'x', 0x99]);
        for triplet in packet[5..62].chunks(3) {
            assert_eq!(triplet, &FILLER_TRIPLET);
        }
        assert_eq!(&packet[62..], &[0x00, 0x00]);
    }

    #[test]
    fn test_every_packet_is_framed() {
        for cells in [0, 1, 20, 21, 22, 336, 400] {
            let packets = packetize(&payload_of(cells));
            assert_eq!(packets.len(), (cells * 3).div_ceil(CHUNK_SIZE));
            for packet in &packets {
                assert_eq!(packet.len(), PACKET_SIZE);
                assert_eq!(packet[0], FRAME_BYTE);
            }
        }
    }

    #[test]
    fn test_format_packet_line() {
        assert_eq!(format_packet_line(&[0xF2, 0x84, 0x00]), "[0xf2, 0x84, 0x00]");
        assert_eq!(format_packet_line(&[]), "[]");
    }
}
