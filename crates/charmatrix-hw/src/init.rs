//! Init-file parsing.
//!
//! Each non-blank, non-comment line may hold a bracketed list of byte
//! literals, decimal or `0x`-prefixed hex:
//!
//! ```text
//! # wake up
//! [0xf2, 0x01, 0, 255]
//! ```
//!
//! Lines without a bracketed list are skipped. A value above 255 aborts the
//! whole parse.

use regex_lite::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::{Error, Result};

/// First bracketed list on a line.
static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*(.*?)\s*\]").expect("valid regex"));

/// Hex or decimal byte literal inside a list.
static BYTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[0-9A-Fa-f]+|\d+").expect("valid regex"));

/// Extracts the body of the first `[...]` list on a line.
fn bracketed(line: &str) -> Option<&str> {
    LIST_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

/// Numeric tokens of a list body; separators and other characters are
/// ignored.
fn tokens(body: &str) -> Vec<&str> {
    BYTE_RE.find_iter(body).map(|m| m.as_str()).collect()
}

/// Parses one token into a byte.
fn parse_byte(line_no: usize, token: &str) -> Result<u8> {
    let value = match token.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.parse::<u64>(),
    };
    value
        .ok()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| Error::ByteOutOfRange {
            line: line_no,
            value: token.to_string(),
        })
}

/// Parses one line. `Ok(None)` means the line carries no packet.
fn parse_line(line_no: usize, line: &str) -> Result<Option<Vec<u8>>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let Some(body) = bracketed(line) else {
        debug!("Init line {} has no byte list, skipping", line_no);
        return Ok(None);
    };

    let packet = tokens(body)
        .into_iter()
        .map(|token| parse_byte(line_no, token))
        .collect::<Result<Vec<u8>>>()?;

    if packet.is_empty() {
        warn!("Init line {} has an empty byte list, skipping", line_no);
        return Ok(None);
    }

    Ok(Some(packet))
}

/// Parses init-file contents into raw packets, in file order.
pub fn parse_init(content: &str) -> Result<Vec<Vec<u8>>> {
    let mut packets = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(packet) = parse_line(idx + 1, line)? {
            packets.push(packet);
        }
    }
    Ok(packets)
}

/// Reads and parses an init file.
pub fn load_init_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let packets = parse_init(&content)?;
    debug!(
        "Parsed {} init packets from {}",
        packets.len(),
        path.as_ref().display()
    );
    Ok(packets)
}
