//! Frame reader: byte stream to decoded frames
//!
//! Accumulates transport bytes, scans for the sync byte, and yields at
//! most one CRC-validated frame per call. On a checksum failure only the
//! sync byte is consumed, so the scan resynchronizes on the next valid
//! frame instead of trusting a corrupted length.

use super::frame::{self, Frame};
use crate::error::LinkError;
use crate::transport::Transport;

const READ_CHUNK: usize = 256;

/// Header: sync(1) + groups(1) + field mask(2)
const HEADER_LEN: usize = 4;
const CRC_LEN: usize = 2;

/// Incremental parser over a byte transport
#[derive(Default)]
pub struct FrameReader {
    buffer: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read available bytes and try to parse a frame
    ///
    /// Returns `Ok(None)` when no complete frame is buffered yet.
    pub fn read_frame(&mut self, transport: &mut dyn Transport) -> Result<Option<Frame>, LinkError> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = transport.read(&mut chunk)?;
        if n > 0 {
            self.buffer.extend_from_slice(&chunk[..n]);
        }
        Ok(self.try_parse())
    }

    /// Drop any partially-buffered data (on disconnect)
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    fn try_parse(&mut self) -> Option<Frame> {
        loop {
            let Some(sync) = self.buffer.iter().position(|&b| b == frame::SYNC) else {
                self.buffer.clear();
                return None;
            };
            if sync > 0 {
                self.buffer.drain(..sync);
            }

            if self.buffer.len() < HEADER_LEN {
                return None;
            }

            let groups = self.buffer[1];
            if groups != frame::GROUP_COMMON {
                log::debug!("Unexpected group mask 0x{:02X}, resyncing", groups);
                self.buffer.drain(..1);
                continue;
            }

            let fields = u16::from_le_bytes([self.buffer[2], self.buffer[3]]);
            let Some(payload_len) = frame::payload_len(fields) else {
                log::debug!("Unsizable field mask 0x{:04X}, resyncing", fields);
                self.buffer.drain(..1);
                continue;
            };

            let total = HEADER_LEN + payload_len + CRC_LEN;
            if self.buffer.len() < total {
                return None;
            }

            let received = u16::from_be_bytes([self.buffer[total - 2], self.buffer[total - 1]]);
            let calculated = frame::crc16(&self.buffer[1..total - CRC_LEN]);
            if calculated != received {
                log::warn!(
                    "Frame CRC mismatch: received=0x{:04X}, calculated=0x{:04X}",
                    received,
                    calculated
                );
                self.buffer.drain(..1);
                continue;
            }

            let parsed = frame::decode(fields, &self.buffer[HEADER_LEN..total - CRC_LEN]);
            self.buffer.drain(..total);
            return parsed;
        }
    }
}
