use crate::{
    codec::{encode_packet, Decoded, PacketDecoder},
    command::{Command, DISTANCE_DATA},
    error::{Error, Result},
    flags::{DistanceOutput, UpdateRate},
    io_adapter::IoAdapter,
    packet::Packet,
    response::{decode_reading, str16_from_packet, FirmwareVersion, ProductInfo, Reading},
};
use arraystring::SmallString;
use num_traits::FromPrimitive;
use std::time::{Duration, Instant};

/// How many times a request is sent before giving up on a response
pub const ATTEMPTS: usize = 4;

pub struct Lwnx<IO>
where
    IO: IoAdapter,
{
    io: IO,
}

impl<IO> Lwnx<IO>
where
    IO: IoAdapter,
{
    pub fn new(io: IO) -> Self {
        Lwnx { io }
    }

    pub fn into_inner(self) -> IO {
        self.io
    }

    fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        log::trace!("Sending {:?}", packet);
        self.io.write_all(packet.as_bytes())
    }

    /// Reads until a valid packet for `command` arrives or `timeout` expires
    ///
    /// Packets for other commands and malformed data are skipped. Every call
    /// starts parsing from scratch.
    pub fn wait_for_packet(&mut self, command: u8, timeout: Duration) -> Result<Option<Packet>> {
        let mut decoder = PacketDecoder::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() >= deadline {
                return Ok(None);
            }
            let byte = match self.io.read_byte()? {
                Some(byte) => byte,
                None => continue,
            };
            match decoder.feed(byte) {
                Decoded::Packet(packet) if packet.command() == command => {
                    log::trace!("Received {:?}", packet);
                    return Ok(Some(packet));
                }
                Decoded::Packet(packet) => {
                    log::trace!("Skipping packet for command {}", packet.command())
                }
                Decoded::Resynced => log::trace!("Decoder resynced while waiting for {}", command),
                Decoded::Incomplete => {}
            }
        }
    }

    /// Sends a request and waits for the matching response, retrying on timeout
    pub fn execute_raw(
        &mut self,
        command: u8,
        write: bool,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<Packet> {
        let packet = encode_packet(command, write, payload)?;
        self.send_with_retries(&packet, timeout)
    }

    pub fn execute(&mut self, cmd: Command, timeout: Duration) -> Result<Packet> {
        let packet = cmd.encode()?;
        self.send_with_retries(&packet, timeout)
    }

    fn send_with_retries(&mut self, packet: &Packet, timeout: Duration) -> Result<Packet> {
        for attempt in 1..=ATTEMPTS {
            self.send_packet(packet)?;
            if let Some(response) = self.wait_for_packet(packet.command(), timeout)? {
                return Ok(response);
            }
            log::debug!(
                "No response to command {} (attempt {}/{})",
                packet.command(),
                attempt,
                ATTEMPTS
            );
        }
        Err(Error::NoResponse {
            command: packet.command(),
            attempts: ATTEMPTS,
        })
    }

    pub fn product_name(&mut self, timeout: Duration) -> Result<SmallString> {
        let response = self.execute(Command::ProductName, timeout)?;
        str16_from_packet(&response)
    }

    pub fn firmware_version(&mut self, timeout: Duration) -> Result<FirmwareVersion> {
        let response = self.execute(Command::FirmwareVersion, timeout)?;
        FirmwareVersion::try_from_packet(&response)
    }

    pub fn serial_number(&mut self, timeout: Duration) -> Result<SmallString> {
        let response = self.execute(Command::SerialNumber, timeout)?;
        str16_from_packet(&response)
    }

    pub fn product_info(&mut self, timeout: Duration) -> Result<ProductInfo> {
        Ok(ProductInfo {
            product_name: self.product_name(timeout)?,
            firmware_version: self.firmware_version(timeout)?,
            serial_number: self.serial_number(timeout)?,
        })
    }

    /// Sets update rate by its code, codes outside of 1..=12 are rejected before
    /// anything is sent
    pub fn set_update_rate(&mut self, code: u8, timeout: Duration) -> Result<UpdateRate> {
        let rate = UpdateRate::from_u8(code).ok_or(Error::InvalidUpdateRate(code))?;
        self.execute(Command::SetUpdateRate(rate), timeout)?;
        Ok(rate)
    }

    pub fn set_distance_output(&mut self, output: DistanceOutput, timeout: Duration) -> Result<()> {
        self.execute(Command::SetDistanceOutput(output), timeout)?;
        Ok(())
    }

    pub fn set_stream_enable(&mut self, enable: bool, timeout: Duration) -> Result<()> {
        self.execute(Command::SetStreamEnable(enable), timeout)?;
        Ok(())
    }

    /// Waits for the next streamed reading
    ///
    /// `Ok(None)` covers both a timeout and a distance packet too short to decode,
    /// neither of which ends streaming.
    pub fn wait_for_reading(&mut self, timeout: Duration) -> Result<Option<Reading>> {
        Ok(self
            .wait_for_packet(DISTANCE_DATA, timeout)?
            .as_ref()
            .and_then(decode_reading))
    }
}
