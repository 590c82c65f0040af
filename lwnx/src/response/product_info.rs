use crate::{
    error::{Error, Result},
    packet::Packet,
};
use core::{
    fmt,
    fmt::Display,
};

use arraystring::SmallString;

/// Length of fixed-size string fields in device responses
const STR16_LEN: usize = 16;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl FirmwareVersion {
    /// Payload carries the version in reverse order: patch, minor, major
    pub(crate) fn try_from_packet(packet: &Packet) -> Result<Self> {
        match packet.payload() {
            [patch, minor, major, ..] => Ok(FirmwareVersion {
                major: *major,
                minor: *minor,
                patch: *patch,
            }),
            _ => Err(Error::InvalidData("Firmware version response is too short")),
        }
    }
}

impl Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}.{}.{}", self.major, self.minor, self.patch))
    }
}

/// Decodes a NUL-terminated string of at most 16 bytes from the packet payload
pub(crate) fn str16_from_packet(packet: &Packet) -> Result<SmallString> {
    let text: String = packet
        .payload()
        .iter()
        .take(STR16_LEN)
        .take_while(|b| **b != 0)
        .map(|b| if b.is_ascii() { *b as char } else { '?' })
        .collect();
    SmallString::try_from_str(text).map_err(|_| Error::InvalidData("String field is too long"))
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ProductInfo {
    pub product_name: SmallString,
    pub firmware_version: FirmwareVersion,
    pub serial_number: SmallString,
}

impl Display for ProductInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            concat!("Product: {}\n", "Firmware: {}\n", "Serial: {}",),
            &self.product_name, &self.firmware_version, &self.serial_number
        ))
    }
}
