pub(crate) mod std_io;
#[cfg(feature = "embedded-hal-nb")]
pub(crate) mod embedded_hal;

use crate::{device::Lwnx, error::Result};

pub trait IoAdapter {
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;
    /// Reads whatever is available, `Ok(0)` means the read timed out
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn open_lwnx(self) -> Lwnx<Self>
    where
        Self: Sized,
    {
        Lwnx::new(self)
    }
}
