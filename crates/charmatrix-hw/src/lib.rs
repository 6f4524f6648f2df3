//! Character Matrix Display Library
//!
//! Encodes styled text into the fixed 64-byte HID reports understood by
//! USB character-matrix displays, and writes them to the device with the
//! pacing the hardware needs.

pub mod display;
pub mod error;
pub mod init;

pub use display::{
    encode_text, format_packet_line, Background, DisplayWriter, Foreground, HidTransport, Packet,
    Payload, SendStatus, TextBlock, Transport, WriterOptions,
};
pub use error::{Error, Result};

/// Total number of character cells on the display.
pub const DISPLAY_CHARS: usize = 336;

/// Default USB VID:PID of the display.
pub const DEFAULT_VID: u16 = 0x4098;
pub const DEFAULT_PID: u16 = 0xBB35;
