//! Payload construction: one `(prefix, 0x00, char)` triplet per character.

use super::text::TextBlock;

/// Prefix used when there are no blocks at all, and for filler triplets.
pub const DEFAULT_PREFIX: u8 = 0x42;

/// Byte substituted for characters outside 7-bit ASCII.
pub const PLACEHOLDER: u8 = b'?';

/// Number of blank cells emitted for an empty block.
pub const BLANK_RUN: usize = 21;

/// Filler triplet used for blank regions and short final packets.
pub const FILLER_TRIPLET: [u8; 3] = [DEFAULT_PREFIX, 0x00, b' '];

/// Flat byte stream of character triplets.
///
/// The length is always a multiple of three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one character cell.
    pub fn push(&mut self, prefix: u8, byte: u8) {
        self.bytes.extend_from_slice(&[prefix, 0x00, byte]);
    }

    /// Appends `count` blank cells in the given colors.
    pub fn push_blank(&mut self, prefix: u8, count: usize) {
        for _ in 0..count {
            self.push(prefix, b' ');
        }
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of triplets in the payload.
    pub fn cells(&self) -> usize {
        self.bytes.len() / 3
    }
}

/// Best-effort ASCII encoding of a single character.
fn ascii_byte(c: char) -> u8 {
    if c.is_ascii() {
        c as u8
    } else {
        PLACEHOLDER
    }
}

/// Builds the payload for already-normalized blocks.
///
/// Empty blocks become a blank run in their own colors. With no blocks at
/// all the payload is a blank run with [`DEFAULT_PREFIX`], which is fixed
/// and not derived from the palettes.
pub fn build_payload(blocks: &[TextBlock]) -> Payload {
    let mut payload = Payload::new();

    if blocks.is_empty() {
        payload.push_blank(DEFAULT_PREFIX, BLANK_RUN);
        return payload;
    }

    for block in blocks {
        let prefix = block.prefix();
        if block.text.is_empty() {
            payload.push_blank(prefix, BLANK_RUN);
        } else {
            for c in block.text.chars() {
                payload.push(prefix, ascii_byte(c));
            }
        }
    }

    payload
}
