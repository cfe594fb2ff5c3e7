//! Shift-register display chain
//!
//! The four display groups and the LED byte sit on one chain of 74HC595
//! style registers. A frame is clocked out over SPI (MOSI + SCK only) and
//! committed by pulsing the storage latch low, high, low.
//!
//! ```ignore
//! let mut chain = ShiftRegisterChain::new(spi, latch);
//! chain.send(&frame)?;
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use stepdeck_core::traits::FrameTransport;
use stepdeck_protocol::Frame;

/// Errors that can occur while sending a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftRegisterError {
    /// SPI transfer failed
    Bus,
    /// Latch line could not be driven
    Latch,
}

/// Display chain on an SPI bus with a separate latch line
pub struct ShiftRegisterChain<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
}

impl<SPI, LATCH> ShiftRegisterChain<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    /// Create a chain driver
    pub fn new(spi: SPI, latch: LATCH) -> Self {
        Self { spi, latch }
    }

    /// Release the bus and latch pin
    pub fn release(self) -> (SPI, LATCH) {
        (self.spi, self.latch)
    }

    fn pulse_latch(&mut self) -> Result<(), ShiftRegisterError> {
        self.latch.set_low().map_err(|_| ShiftRegisterError::Latch)?;
        self.latch.set_high().map_err(|_| ShiftRegisterError::Latch)?;
        self.latch.set_low().map_err(|_| ShiftRegisterError::Latch)
    }
}

impl<SPI, LATCH> FrameTransport for ShiftRegisterChain<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    type Error = ShiftRegisterError;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.spi
            .write(&frame.wire_bytes())
            .map_err(|_| ShiftRegisterError::Bus)?;
        // All bits must be in the registers before the latch edge
        self.spi.flush().map_err(|_| ShiftRegisterError::Bus)?;
        self.pulse_latch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType};
    use stepdeck_protocol::FRAME_LEN;

    /// Records bytes written and the latch edges seen after them
    struct MockSpi {
        written: [u8; 32],
        len: usize,
        flushed: bool,
        fail: bool,
    }

    impl MockSpi {
        fn new() -> Self {
            Self {
                written: [0; 32],
                len: 0,
                flushed: false,
                fail: false,
            }
        }
    }

    impl SpiErrorType for MockSpi {
        type Error = ErrorKind;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.written[self.len..self.len + words.len()].copy_from_slice(words);
            self.len += words.len();
            self.flushed = false;
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.write(write)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushed = true;
            Ok(())
        }
    }

    /// Latch pin recording its level sequence
    struct MockLatch {
        levels: [bool; 8],
        count: usize,
    }

    impl MockLatch {
        fn new() -> Self {
            Self {
                levels: [false; 8],
                count: 0,
            }
        }

        fn push(&mut self, level: bool) {
            self.levels[self.count] = level;
            self.count += 1;
        }
    }

    impl PinErrorType for MockLatch {
        type Error = Infallible;
    }

    impl OutputPin for MockLatch {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.push(true);
            Ok(())
        }
    }

    #[test]
    fn test_send_writes_wire_order_then_latches() {
        let mut chain = ShiftRegisterChain::new(MockSpi::new(), MockLatch::new());
        let frame = Frame::from_parts([[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]], 0xF0);

        chain.send(&frame).unwrap();
        let (spi, latch) = chain.release();

        assert_eq!(spi.len, FRAME_LEN);
        assert_eq!(&spi.written[..FRAME_LEN], &frame.wire_bytes()[..]);
        assert_eq!(spi.written[0], 0xF0);
        assert!(spi.flushed);
        assert_eq!(&latch.levels[..latch.count], &[false, true, false]);
    }

    #[test]
    fn test_clear_sends_blank_frame() {
        let mut chain = ShiftRegisterChain::new(MockSpi::new(), MockLatch::new());
        chain.clear().unwrap();
        let (spi, _) = chain.release();

        assert_eq!(spi.written[0], 0xFF);
        assert!(spi.written[1..FRAME_LEN].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bus_error_skips_latch() {
        let mut spi = MockSpi::new();
        spi.fail = true;
        let mut chain = ShiftRegisterChain::new(spi, MockLatch::new());

        assert_eq!(chain.send(&Frame::blank()), Err(ShiftRegisterError::Bus));
        let (_, latch) = chain.release();
        assert_eq!(latch.count, 0);
    }
}
