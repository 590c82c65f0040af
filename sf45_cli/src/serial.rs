use clap::Args;
use lwnx::{IoAdapter, Lwnx, StdIoAdapter};
use serialport::SerialPort;
use simple_eyre::{eyre::eyre, Result};
use std::time::Duration;

#[derive(Args)]
pub struct SerialConf {
    /// Name of serial port that should be used
    #[clap(short, long, value_parser, default_value = "/dev/ttyUSB0")]
    pub serial: String,
    /// Which baud rate to use
    #[clap(short, long, value_parser, default_value = "921600")]
    pub baud_rate: u32,
    /// How long a single read waits for data, in milliseconds
    #[clap(long, value_parser, default_value = "100")]
    pub timeout_ms: u64,
}

pub type SerialLwnx = Lwnx<StdIoAdapter<Box<dyn SerialPort>>>;

impl SerialConf {
    pub fn open_lwnx(&self) -> Result<SerialLwnx> {
        let port = serialport::new(&self.serial, self.baud_rate)
            .timeout(Duration::from_millis(self.timeout_ms))
            .open()
            .map_err(|e| eyre!("Could not open serial port {}: {}", self.serial, e))?;
        log::info!("Opened serial port {} at {} baud", self.serial, self.baud_rate);
        Ok(StdIoAdapter::new(port).open_lwnx())
    }
}
