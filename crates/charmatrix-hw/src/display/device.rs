//! Display communication via USB HID.

use hidapi::{HidApi, HidDevice};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

use super::protocol::Packet;
use super::text::TextBlock;
use crate::{init, Error, Result, DEFAULT_PID, DEFAULT_VID};

/// Shortest delay between text packets. Shorter delays corrupt the display.
pub const MIN_WRITE_DELAY: Duration = Duration::from_millis(10);

/// Delay between init packets.
pub const INIT_DELAY: Duration = Duration::from_millis(1);

/// Writes single packets to the display.
pub trait Transport: Send + Sync {
    /// Writes exactly one packet. May block.
    fn write_packet(&self, packet: &[u8]) -> Result<()>;
}

/// HID-backed transport.
pub struct HidTransport {
    device: Mutex<HidDevice>,
}

impl HidTransport {
    /// Opens the display by VID:PID.
    pub fn open(vid: u16, pid: u16) -> Result<Self> {
        let api = HidApi::new()?;

        let device = api.open(vid, pid).map_err(|e| {
            debug!("Failed to open device: {}", e);
            Error::DeviceNotFound { vid, pid }
        })?;

        info!("Display opened (VID:{:04X} PID:{:04X})", vid, pid);

        Ok(Self {
            device: Mutex::new(device),
        })
    }

    /// Opens the display by HID path.
    pub fn open_path(path: &str) -> Result<Self> {
        let api = HidApi::new()?;

        let c_path = std::ffi::CString::new(path)
            .map_err(|_| Error::DeviceNotFoundAt(path.to_string()))?;
        let device = api.open_path(c_path.as_c_str()).map_err(|e| {
            debug!("Failed to open device: {}", e);
            Error::DeviceNotFoundAt(path.to_string())
        })?;

        info!("Display opened at path: {}", path);

        Ok(Self {
            device: Mutex::new(device),
        })
    }
}

impl Transport for HidTransport {
    fn write_packet(&self, packet: &[u8]) -> Result<()> {
        let device = self.device.lock().unwrap_or_else(|e| e.into_inner());
        device.write(packet)?;
        Ok(())
    }
}

/// How to open and prepare the display.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    pub vid: u16,
    pub pid: u16,
    /// HID path; takes precedence over VID:PID when set.
    pub path: Option<String>,
    pub write_delay: Duration,
    /// Init file sent once after opening.
    pub init_file: Option<PathBuf>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            vid: DEFAULT_VID,
            pid: DEFAULT_PID,
            path: None,
            write_delay: MIN_WRITE_DELAY,
            init_file: None,
        }
    }
}

/// Outcome of a send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// All packets were written.
    Sent { packets: usize },
    /// Another send was in flight; nothing was written.
    Busy,
}

/// Clears the busy flag when dropped.
struct WriteGuard<'a> {
    writing: &'a AtomicBool,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.writing.store(false, Ordering::Release);
    }
}

/// Serializes packet sequences to one display.
///
/// Only one sequence is in flight at a time. A request arriving while
/// another is being written is dropped, not queued.
pub struct DisplayWriter<T: Transport> {
    transport: T,
    write_delay: Duration,
    writing: AtomicBool,
}

impl DisplayWriter<HidTransport> {
    /// Opens the HID display and sends the init file, if any.
    pub fn open(options: &WriterOptions) -> Result<Self> {
        let transport = match &options.path {
            Some(path) => HidTransport::open_path(path)?,
            None => HidTransport::open(options.vid, options.pid)?,
        };
        let writer = Self::new(transport, options.write_delay);

        if let Some(init_file) = &options.init_file {
            let packets = init::load_init_file(init_file)?;
            if let SendStatus::Sent { packets: count } = writer.send_init(&packets)? {
                info!("Sent {} init packets from {}", count, init_file.display());
            }
        }

        Ok(writer)
    }
}

impl<T: Transport> DisplayWriter<T> {
    /// Wraps a transport. The write delay is clamped to [`MIN_WRITE_DELAY`].
    pub fn new(transport: T, write_delay: Duration) -> Self {
        let write_delay = write_delay.max(MIN_WRITE_DELAY);
        debug!("Write delay set to {:?}", write_delay);
        Self {
            transport,
            write_delay,
            writing: AtomicBool::new(false),
        }
    }

    /// Effective delay between text packets.
    pub fn write_delay(&self) -> Duration {
        self.write_delay
    }

    /// Returns true while a send is in flight.
    pub fn is_busy(&self) -> bool {
        self.writing.load(Ordering::Acquire)
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn try_begin(&self) -> Option<WriteGuard<'_>> {
        self.writing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| WriteGuard {
                writing: &self.writing,
            })
    }

    fn write_all<P: AsRef<[u8]>>(&self, packets: &[P], delay: Duration) -> Result<SendStatus> {
        let Some(_guard) = self.try_begin() else {
            debug!("Display busy, dropping {} packets", packets.len());
            return Ok(SendStatus::Busy);
        };

        for packet in packets {
            self.transport.write_packet(packet.as_ref())?;
            std::thread::sleep(delay);
        }

        Ok(SendStatus::Sent {
            packets: packets.len(),
        })
    }

    /// Encodes and writes styled text.
    pub fn send_text(&self, blocks: &[TextBlock]) -> Result<SendStatus> {
        let packets: Vec<Packet> = super::encode_text(blocks);
        let status = self.write_all(&packets, self.write_delay)?;
        if let SendStatus::Sent { packets } = status {
            debug!("Text sent ({} blocks, {} packets)", blocks.len(), packets);
        }
        Ok(status)
    }

    /// Writes raw init packets with the fixed init delay.
    pub fn send_init(&self, packets: &[Vec<u8>]) -> Result<SendStatus> {
        self.write_all(packets, INIT_DELAY)
    }
}
