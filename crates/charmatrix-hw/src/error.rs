//! Error types for the character-matrix hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when encoding for or talking to the display.
#[derive(Error, Debug)]
pub enum Error {
    /// No HID device matched the requested VID:PID.
    #[error("display not found (VID:PID {vid:04X}:{pid:04X})")]
    DeviceNotFound { vid: u16, pid: u16 },

    /// No HID device could be opened at the given path.
    #[error("display not found at {0}")]
    DeviceNotFoundAt(String),

    /// USB HID communication error.
    #[error("USB HID error: {0}")]
    Hid(#[from] hidapi::HidError),

    /// Reading the init file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An init-file byte literal does not fit in a byte.
    #[error("init line {line}: byte out of range 0..255: {value}")]
    ByteOutOfRange { line: usize, value: String },
}
