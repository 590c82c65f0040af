//! Logging session: handshake, stream distance readings into a sink, stop.
//!
//! Streaming is always disabled again when [`Session::run`] returns, whether it
//! was stopped through the `running` flag or failed part way through.

use crate::{
    device::Lwnx,
    error::Result,
    flags::{DistanceOutput, UpdateRate},
    io_adapter::IoAdapter,
    response::{ProductInfo, Reading},
};
use scopeguard::guard;
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};
use time::OffsetDateTime;

/// Reading stamped with the host time it was received at
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct LoggedReading {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    /// Meters
    pub distance: f64,
    /// Degrees
    pub angle: f64,
}

impl LoggedReading {
    pub fn now(reading: Reading) -> Self {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9;
        LoggedReading {
            timestamp,
            distance: reading.distance,
            angle: reading.angle,
        }
    }
}

/// Append-only destination for readings
pub trait ReadingSink {
    fn append(&mut self, reading: &LoggedReading) -> Result<()>;
    /// Called after every appended reading
    fn flush(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Update rate code, see [`UpdateRate`]
    pub update_rate: u8,
    /// Timeout for product information queries
    pub query_timeout: Duration,
    /// Timeout for configuration commands
    pub command_timeout: Duration,
    /// How long to wait for each streamed reading
    pub reading_timeout: Duration,
    /// Delay between readings, zero reads as fast as the device streams
    pub pace: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            update_rate: UpdateRate::Hz50.code(),
            query_timeout: Duration::from_millis(100),
            command_timeout: Duration::from_secs(1),
            reading_timeout: Duration::from_secs(1),
            pace: Duration::ZERO,
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct SessionSummary {
    /// Readings written to the sink
    pub readings: usize,
    /// Iterations that ended without a valid reading
    pub misses: usize,
}

pub struct Session<IO, S>
where
    IO: IoAdapter,
    S: ReadingSink,
{
    lwnx: Lwnx<IO>,
    sink: S,
    config: SessionConfig,
}

impl<IO, S> Session<IO, S>
where
    IO: IoAdapter,
    S: ReadingSink,
{
    pub fn new(lwnx: Lwnx<IO>, sink: S, config: SessionConfig) -> Self {
        Session { lwnx, sink, config }
    }

    pub fn into_parts(self) -> (Lwnx<IO>, S) {
        (self.lwnx, self.sink)
    }

    /// Reads product information and configures the device for streaming
    pub fn handshake(&mut self) -> Result<ProductInfo> {
        let SessionConfig {
            update_rate,
            query_timeout,
            command_timeout,
            ..
        } = self.config;

        let info = self.lwnx.product_info(query_timeout)?;
        log::info!(
            "Connected to {} (firmware {}, serial {})",
            info.product_name,
            info.firmware_version,
            info.serial_number
        );
        let rate = self.lwnx.set_update_rate(update_rate, command_timeout)?;
        log::info!("Update rate set to {}", rate);
        self.lwnx.set_distance_output(
            DistanceOutput::FIRST_RETURN | DistanceOutput::YAW_ANGLE,
            command_timeout,
        )?;
        Ok(info)
    }

    /// Runs the handshake, then logs readings until `running` is cleared
    pub fn run(&mut self, running: &AtomicBool) -> Result<SessionSummary> {
        self.handshake()?;

        let SessionConfig {
            command_timeout,
            reading_timeout,
            pace,
            ..
        } = self.config;
        // Armed before enabling, a lost acknowledgement may still have started the stream
        let mut s = guard(self, |s| {
            if let Err(e) = s.lwnx.set_stream_enable(false, command_timeout) {
                log::warn!("Failed to disable distance stream: {}", e);
            } else {
                log::info!("Distance stream disabled");
            }
        });
        s.lwnx.set_stream_enable(true, command_timeout)?;
        log::info!("Distance stream enabled");

        let mut summary = SessionSummary::default();
        while running.load(Ordering::SeqCst) {
            match s.lwnx.wait_for_reading(reading_timeout)? {
                Some(reading) => {
                    let logged = LoggedReading::now(reading);
                    s.sink.append(&logged)?;
                    s.sink.flush()?;
                    summary.readings += 1;
                }
                None => {
                    log::warn!("No valid reading");
                    summary.misses += 1;
                }
            }
            if !pace.is_zero() {
                std::thread::sleep(pace);
            }
        }
        log::info!(
            "Session stopped after {} readings ({} misses)",
            summary.readings,
            summary.misses
        );
        Ok(summary)
    }
}
