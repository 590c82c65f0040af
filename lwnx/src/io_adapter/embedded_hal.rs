use super::IoAdapter;
use crate::error::{Error, Result};
use embedded_hal_nb::serial::{Read, Write};
use nb::block;

pub struct EmbeddedHalNbAdapter<IO: Read + Write> {
    io: IO,
}

impl<IO: Read + Write> EmbeddedHalNbAdapter<IO> {
    pub fn new(io: IO) -> Self {
        EmbeddedHalNbAdapter { io }
    }
}

impl<IO: Read + Write> IoAdapter for EmbeddedHalNbAdapter<IO> {
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        for b in buf {
            block!(self.io.write(*b)).map_err(|_| Error::EmbeddedHalNb)?;
        }
        block!(self.io.flush()).map_err(|_| Error::EmbeddedHalNb)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        for (i, b) in buf.iter_mut().enumerate() {
            match self.read_byte()? {
                Some(val) => *b = val,
                None => return Ok(i),
            }
        }
        Ok(buf.len())
    }

    // Nothing buffered yet is reported the same way as a timed out read
    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.io.read() {
            Ok(val) => Ok(Some(val)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(_)) => Err(Error::EmbeddedHalNb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use core::convert::Infallible;
    use embedded_hal_nb::serial::ErrorType;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Loopback {
        rx: VecDeque<u8>,
    }

    impl ErrorType for Loopback {
        type Error = Infallible;
    }

    impl Read for Loopback {
        fn read(&mut self) -> nb::Result<u8, Infallible> {
            self.rx.pop_front().ok_or(nb::Error::WouldBlock)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
            self.rx.push_back(word);
            Ok(())
        }

        fn flush(&mut self) -> nb::Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn echo_bytes() {
        let mut adapter = EmbeddedHalNbAdapter::new(Loopback::default());
        assert_ok!(adapter.write_all(&[0xAA, 0x40]));
        let mut buf = [0u8; 4];
        assert_ok_eq!(adapter.read(&mut buf), 2);
        assert_eq!(&buf[..2], &[0xAA, 0x40]);
        assert_ok_eq!(adapter.read_byte(), None);
    }
}
