use crate::checksum::checksum;
use core::fmt;

/// Leading byte of every packet
pub const MARKER: u8 = 0xAA;
/// Marker + 2 flag bytes
pub const HEADER_SIZE: usize = 3;
/// Little-endian checksum trailer
pub const CHECKSUM_SIZE: usize = 2;
/// Largest value of the declared size (`(flags >> 6) + 2`) the decoder accepts
pub const MAX_DECLARED_SIZE: usize = 1019;
/// Largest payload the encoder produces, so that every encoded packet is decodable
pub const MAX_PAYLOAD_SIZE: usize = MAX_DECLARED_SIZE - 3;

/// Complete, checksum-verified LWNX packet
///
/// Layout: `[0xAA, flags_lo, flags_hi, command, payload.., crc_lo, crc_hi]`
#[derive(PartialEq, Eq, Clone)]
pub struct Packet {
    bytes: Vec<u8>,
}

impl Packet {
    /// Wraps bytes that were already framed and verified
    pub(crate) fn from_verified(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.len() >= HEADER_SIZE + CHECKSUM_SIZE);
        Packet { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn flags(&self) -> u16 {
        u16::from_le_bytes([self.bytes[1], self.bytes[2]])
    }

    pub fn is_write(&self) -> bool {
        self.flags() & 0x1 == 1
    }

    /// Command identifier, first byte after the header
    pub fn command(&self) -> u8 {
        self.bytes[HEADER_SIZE]
    }

    /// Bytes between the command identifier and the checksum trailer
    pub fn payload(&self) -> &[u8] {
        let end = self.bytes.len() - CHECKSUM_SIZE;
        let start = (HEADER_SIZE + 1).min(end);
        &self.bytes[start..end]
    }

    /// Checksum carried in the trailer
    pub fn checksum(&self) -> u16 {
        let end = self.bytes.len();
        u16::from_le_bytes([self.bytes[end - 2], self.bytes[end - 1]])
    }

    /// Recomputes the checksum of everything preceding the trailer
    pub(crate) fn body_checksum(bytes: &[u8]) -> u16 {
        checksum(&bytes[..bytes.len() - CHECKSUM_SIZE])
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("command", &self.command())
            .field("write", &self.is_write())
            .field("payload", &self.payload())
            .finish()
    }
}
