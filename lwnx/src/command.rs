use crate::{
    codec::encode_packet,
    error::Result,
    flags::{DistanceOutput, UpdateRate},
    packet::Packet,
};

/// Identifier of the packet the device streams with every distance reading
pub const DISTANCE_DATA: u8 = 44;

/// Request that can be sent to the device
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Command {
    ProductName,
    FirmwareVersion,
    SerialNumber,
    SetDistanceOutput(DistanceOutput),
    SetStreamEnable(bool),
    SetUpdateRate(UpdateRate),
}

impl Command {
    /// Command identifier, echoed back in the response
    pub fn id(&self) -> u8 {
        use Command::*;
        match *self {
            ProductName => 0,
            FirmwareVersion => 2,
            SerialNumber => 3,
            SetDistanceOutput(_) => 27,
            SetStreamEnable(_) => 30,
            SetUpdateRate(_) => 66,
        }
    }

    pub fn is_write(&self) -> bool {
        use Command::*;
        !matches!(self, ProductName | FirmwareVersion | SerialNumber)
    }

    pub fn payload(&self) -> Vec<u8> {
        use Command::*;
        match *self {
            ProductName | FirmwareVersion | SerialNumber => Vec::new(),
            SetDistanceOutput(output) => output.to_bytes().to_vec(),
            // 5 streams distance data, 0 stops streaming
            SetStreamEnable(enable) => (if enable { 5u32 } else { 0 }).to_le_bytes().to_vec(),
            SetUpdateRate(rate) => vec![rate.code()],
        }
    }

    pub fn encode(&self) -> Result<Packet> {
        encode_packet(self.id(), self.is_write(), &self.payload())
    }
}
