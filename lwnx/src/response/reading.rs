use crate::{command::DISTANCE_DATA, packet::Packet};

/// Raw yaw angles above this value are negative angles wrapped around 16 bits
pub const ANGLE_WRAP_THRESHOLD: u16 = 32000;

/// Single distance measurement
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Reading {
    /// First return distance in meters
    pub distance: f64,
    /// Yaw angle of the scanning head in degrees
    pub angle: f64,
}

/// Interprets a streamed distance packet
///
/// Returns `None` for packets of another type or with a payload too short to
/// carry both the distance and the yaw angle.
pub fn decode_reading(packet: &Packet) -> Option<Reading> {
    if packet.command() != DISTANCE_DATA {
        return None;
    }
    let payload = packet.payload();
    if payload.len() < 4 {
        return None;
    }
    let distance = u16::from_le_bytes([payload[0], payload[1]]);
    let raw_angle = u16::from_le_bytes([payload[2], payload[3]]);
    // The device subtracts 65535 rather than 65536
    let angle = if raw_angle > ANGLE_WRAP_THRESHOLD {
        raw_angle as i32 - 65535
    } else {
        raw_angle as i32
    };

    Some(Reading {
        distance: distance as f64 / 100.0,
        angle: angle as f64 / 100.0,
    })
}
