//! Byte-at-a-time LWNX packet decoder.
//!
//! Each wait for a response owns a fresh [`PacketDecoder`], so no partially
//! parsed packet leaks from one exchange into the next. Noise, oversized length
//! fields and checksum mismatches silently drop the packet in progress and the
//! decoder goes back to hunting for a marker byte.

use crate::packet::{Packet, HEADER_SIZE, MARKER, MAX_DECLARED_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    AwaitingMarker,
    GotMarker,
    GotFlagsLow,
    AccumulatingPayload,
}

/// Outcome of feeding a single byte
#[derive(Debug, PartialEq, Eq)]
pub enum Decoded {
    /// More bytes are needed (or the byte was noise outside of a packet)
    Incomplete,
    /// A packet with a valid checksum was completed
    Packet(Packet),
    /// The packet in progress was malformed and has been dropped
    Resynced,
}

#[derive(Debug, Clone, Default)]
pub struct PacketDecoder {
    state: ParseState,
    // Bytes of the packet in progress, marker included
    buf: Vec<u8>,
    // Bytes still expected after the header
    remaining: usize,
    // Bytes received so far for the packet in progress
    size: usize,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ParseState::AwaitingMarker;
        self.buf.clear();
        self.remaining = 0;
        self.size = 0;
    }

    pub fn feed(&mut self, byte: u8) -> Decoded {
        use ParseState::*;

        match self.state {
            AwaitingMarker => {
                if byte == MARKER {
                    self.buf.clear();
                    self.buf.push(byte);
                    self.state = GotMarker;
                }
                Decoded::Incomplete
            }
            GotMarker => {
                self.buf.push(byte);
                self.state = GotFlagsLow;
                Decoded::Incomplete
            }
            GotFlagsLow => {
                self.buf.push(byte);
                let flags = u16::from_le_bytes([self.buf[1], self.buf[2]]);
                // Counts the command byte, payload and both checksum bytes
                let declared = (flags >> 6) as usize + 2;
                self.size = HEADER_SIZE;
                if declared > MAX_DECLARED_SIZE {
                    log::trace!("Dropping packet with declared size {}", declared);
                    self.reset();
                    return Decoded::Resynced;
                }
                self.remaining = declared;
                self.state = AccumulatingPayload;
                Decoded::Incomplete
            }
            AccumulatingPayload => {
                self.buf.push(byte);
                self.size += 1;
                self.remaining -= 1;
                if self.remaining > 0 {
                    return Decoded::Incomplete;
                }
                self.state = AwaitingMarker;
                self.verify()
            }
        }
    }

    /// Feeds a whole slice, collecting every packet completed along the way
    pub fn decode_all(&mut self, bytes: &[u8]) -> Vec<Packet> {
        bytes
            .iter()
            .filter_map(|b| match self.feed(*b) {
                Decoded::Packet(packet) => Some(packet),
                _ => None,
            })
            .collect()
    }

    fn verify(&mut self) -> Decoded {
        let trailer = u16::from_le_bytes([self.buf[self.size - 2], self.buf[self.size - 1]]);
        let expected = Packet::body_checksum(&self.buf);
        let bytes = core::mem::take(&mut self.buf);
        self.reset();
        if trailer == expected {
            Decoded::Packet(Packet::from_verified(bytes))
        } else {
            log::trace!(
                "Dropping packet with checksum {:#06x}, expected {:#06x}",
                trailer,
                expected
            );
            Decoded::Resynced
        }
    }
}
