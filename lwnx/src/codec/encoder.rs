use crate::{
    checksum::checksum,
    error::{Error, Result},
    packet::{Packet, MARKER, MAX_PAYLOAD_SIZE},
};

/// Frames a command packet
///
/// The size field carries `payload.len() + 1` (the command byte counts towards it),
/// shifted above the read/write bit.
pub fn encode_packet(command: u8, write: bool, payload: &[u8]) -> Result<Packet> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(Error::PayloadTooLarge(payload.len()));
    }
    let payload_length = 1 + payload.len() as u16;
    let flags = (payload_length << 6) | write as u16;
    let [flags_lo, flags_hi] = flags.to_le_bytes();

    let mut bytes = Vec::with_capacity(payload.len() + 6);
    bytes.extend_from_slice(&[MARKER, flags_lo, flags_hi, command]);
    bytes.extend_from_slice(payload);
    let crc = checksum(&bytes);
    bytes.extend_from_slice(&crc.to_le_bytes());

    Ok(Packet::from_verified(bytes))
}
