//! Incremental packet parser
//!
//! Reassembles protocol packets from arbitrary TCP read chunks.
//!
//! The parser is a resumable state machine: every fully framed block is
//! consumed from the buffer the moment it becomes decodable and banked in
//! `fields`, so parsing cost stays linear in the number of bytes fed no
//! matter how finely the transport fragments the stream. Only an incomplete
//! block at the buffer front forces a retry, and that retry re-reads at most
//! one length header.

use bytes::{Buf, BytesMut};

use super::packet::Packet;
use crate::error::{LinewireError, Result};

/// Maximum size of a single block payload (16 MB).
///
/// A length header above this is treated as corruption rather than an
/// instruction to buffer without bound.
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

/// Longest acceptable length header, in digits. `MAX_BLOCK_SIZE` needs 8.
const MAX_HEADER_DIGITS: usize = 20;

/// Incremental decoder turning a byte stream into discrete [`Packet`]s.
///
/// Bytes are never reordered or dropped: a block is only removed from the
/// buffer once fully decodable, and partial data is retained verbatim
/// across calls to [`try_next`](Self::try_next).
#[derive(Debug, Default)]
pub struct PacketParser {
    /// Unconsumed bytes received since the last extracted block
    buf: BytesMut,

    /// Fully decoded fields of the packet currently being assembled
    fields: Vec<Vec<u8>>,
}

impl PacketParser {
    /// Create an empty parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes to the internal buffer. No parsing happens here.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Reset the buffer and any partially assembled packet.
    ///
    /// Called on connection teardown so a reused parser never leaks bytes
    /// across socket generations.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.fields.clear();
    }

    /// Number of buffered bytes not yet consumed by a decoded block
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Try to decode exactly one complete packet from the buffer front.
    ///
    /// Returns `Ok(None)` when more bytes are needed; the buffer is left
    /// positioned so a later call resumes where this one stopped. Returns
    /// `Err(Corrupt)` when the stream is malformed, which callers must treat
    /// as fatal to the connection: a byte-counted stream cannot be safely
    /// resynchronized after a framing violation.
    ///
    /// Bytes past the extracted packet stay buffered, so a single `feed`
    /// holding two packets yields both across two calls.
    pub fn try_next(&mut self) -> Result<Option<Packet>> {
        loop {
            let header_end = match self.buf.iter().position(|&b| b == b'\n') {
                Some(pos) => pos,
                None => {
                    if self.buf.len() > MAX_HEADER_DIGITS {
                        return Err(LinewireError::Corrupt(format!(
                            "length header exceeds {} digits",
                            MAX_HEADER_DIGITS
                        )));
                    }
                    return Ok(None);
                }
            };

            // Empty line: end-of-packet marker.
            if header_end == 0 {
                self.buf.advance(1);
                if self.fields.is_empty() {
                    return Err(LinewireError::Corrupt(
                        "packet terminator with no preceding fields".to_string(),
                    ));
                }
                let fields = std::mem::take(&mut self.fields);
                return Ok(Some(Packet::new(fields)));
            }

            let len = parse_length(&self.buf[..header_end])?;
            if len > MAX_BLOCK_SIZE {
                return Err(LinewireError::Corrupt(format!(
                    "block of {} bytes exceeds maximum of {}",
                    len, MAX_BLOCK_SIZE
                )));
            }

            // header + '\n' + payload + '\n'
            let block_end = header_end + 1 + len + 1;
            if self.buf.len() < block_end {
                // Incomplete block: leave the buffer untouched and retry
                // once more bytes arrive.
                return Ok(None);
            }

            if self.buf[block_end - 1] != b'\n' {
                return Err(LinewireError::Corrupt(format!(
                    "block payload of {} bytes not followed by newline",
                    len
                )));
            }

            let payload = self.buf[header_end + 1..block_end - 1].to_vec();
            self.buf.advance(block_end);
            self.fields.push(payload);
        }
    }
}

/// Parse a decimal length header.
///
/// Anything other than pure ASCII digits is a framing violation, not a
/// request for more data.
fn parse_length(digits: &[u8]) -> Result<usize> {
    let mut len: usize = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(LinewireError::Corrupt(format!(
                "invalid byte 0x{:02x} in length header",
                b
            )));
        }
        len = len
            .checked_mul(10)
            .and_then(|l| l.checked_add((b - b'0') as usize))
            .ok_or_else(|| {
                LinewireError::Corrupt("length header overflows usize".to_string())
            })?;
    }
    Ok(len)
}
