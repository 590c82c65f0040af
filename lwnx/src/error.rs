use thiserror::Error;
use core::result::Result as CoreResult;

pub type Result<T> = CoreResult<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Update rate code {0} is outside of accepted range 1..=12")]
    InvalidUpdateRate(u8),
    #[error("Payload of {0} bytes does not fit into a single packet")]
    PayloadTooLarge(usize),
    #[error("Command {command} got no response after {attempts} attempts")]
    NoResponse { command: u8, attempts: usize },
    #[error("Could not parse recieved data correctly: {0}")]
    InvalidData(&'static str),

    #[cfg(feature = "embedded-hal-nb")]
    #[error("Serial port reported an error")]
    EmbeddedHalNb,

    #[error("{0}")]
    IOError(#[from] std::io::Error),
}
