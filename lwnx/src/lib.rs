//! Driver for the LWNX binary protocol spoken by LightWare SF45 scanning lidars.
//!
//! Packets are framed as `[0xAA, flags_lo, flags_hi, command, payload.., crc_lo, crc_hi]`.
//! [`Lwnx`] sends commands and waits for their responses with retries, [`Session`]
//! runs the full streaming loop into a [`ReadingSink`].

pub mod checksum;
pub mod codec;
pub mod command;
pub mod device;
pub mod error;
pub mod flags;
pub mod hex_parser;
pub mod io_adapter;
pub mod packet;
pub mod response;
pub mod session;


pub use checksum::checksum;
pub use codec::{encode_packet, Decoded, PacketDecoder, ParseState};
pub use command::{Command, DISTANCE_DATA};
pub use device::{Lwnx, ATTEMPTS};
pub use error::{Error, Result};
pub use flags::{DistanceOutput, UpdateRate};
#[cfg(feature = "embedded-hal-nb")]
pub use io_adapter::embedded_hal::EmbeddedHalNbAdapter;
pub use io_adapter::{std_io::StdIoAdapter, IoAdapter};
pub use packet::Packet;
pub use response::{decode_reading, FirmwareVersion, ProductInfo, Reading};
pub use session::{LoggedReading, ReadingSink, Session, SessionConfig, SessionSummary};
