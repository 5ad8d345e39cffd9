//! Hardware SPI transport
//!
//! Drives SH1106-class panels over a 4-wire SPI link: the bus clocks
//! bytes out, a D/C pin selects command or data mode, chip-select
//! frames each byte, and the reset pin runs the timed power-on pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::transport::{Transport, TransportError};

/// Reset pulse and recovery window
const RESET_HOLD_MS: u32 = 100;

/// [`Transport`] over a hardware SPI bus with D/C, CS and RST pins
pub struct SpiTransport<SPI, DC, CS, RST, D> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    delay: D,
}

impl<SPI, DC, CS, RST, D> SpiTransport<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the bus and control pins
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, delay: D) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            delay,
        }
    }

    fn send(&mut self, byte: u8) -> Result<(), TransportError> {
        self.cs.set_low().map_err(|_| TransportError::Pin)?;
        let result = self
            .spi
            .write(&[byte])
            .and_then(|_| self.spi.flush())
            .map_err(|_| TransportError::Bus);
        // Release CS even when the write failed
        self.cs.set_high().map_err(|_| TransportError::Pin)?;
        result
    }
}

impl<SPI, DC, CS, RST, D> Transport for SpiTransport<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = TransportError;

    fn send_command(&mut self, byte: u8) -> Result<(), TransportError> {
        self.dc.set_low().map_err(|_| TransportError::Pin)?;
        self.send(byte)
    }

    fn send_data(&mut self, byte: u8) -> Result<(), TransportError> {
        self.dc.set_high().map_err(|_| TransportError::Pin)?;
        self.send(byte)
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.rst.set_high().map_err(|_| TransportError::Pin)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.rst.set_low().map_err(|_| TransportError::Pin)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.rst.set_high().map_err(|_| TransportError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Framed {
        byte: u8,
        dc_high: bool,
        cs_low: bool,
    }

    #[derive(Default)]
    struct Wire {
        dc_high: bool,
        cs_low: bool,
        written: heapless::Vec<Framed, 64>,
    }

    struct MockSpi<'a>(&'a RefCell<Wire>);

    impl SpiErrorType for MockSpi<'_> {
        type Error = Infallible;
    }

    impl SpiBus for MockSpi<'_> {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            let mut wire = self.0.borrow_mut();
            for &byte in words {
                let framed = Framed {
                    byte,
                    dc_high: wire.dc_high,
                    cs_low: wire.cs_low,
                };
                wire.written.push(framed).unwrap();
            }
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct DcPin<'a>(&'a RefCell<Wire>);

    impl PinErrorType for DcPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for DcPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    struct CsPin<'a>(&'a RefCell<Wire>);

    impl PinErrorType for CsPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for CsPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().cs_low = true;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().cs_low = false;
            Ok(())
        }
    }

    struct NoopPin;

    impl PinErrorType for NoopPin {
        type Error = Infallible;
    }

    impl OutputPin for NoopPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn test_command_and_data_frame_the_dc_pin() {
        let wire = RefCell::new(Wire::default());
        let mut transport = SpiTransport::new(
            MockSpi(&wire),
            DcPin(&wire),
            CsPin(&wire),
            NoopPin,
            NoopDelay,
        );

        transport.send_command(0xAE).unwrap();
        transport.send_data(0x55).unwrap();

        let written = &wire.borrow().written;
        assert_eq!(
            written.as_slice(),
            &[
                Framed {
                    byte: 0xAE,
                    dc_high: false,
                    cs_low: true,
                },
                Framed {
                    byte: 0x55,
                    dc_high: true,
                    cs_low: true,
                },
            ]
        );
    }

    #[test]
    fn test_cs_released_between_bytes() {
        let wire = RefCell::new(Wire::default());
        let mut transport = SpiTransport::new(
            MockSpi(&wire),
            DcPin(&wire),
            CsPin(&wire),
            NoopPin,
            NoopDelay,
        );

        transport.send_data(0x01).unwrap();
        assert!(!wire.borrow().cs_low);
    }
}
